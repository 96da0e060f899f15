use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lang {
    #[default]
    En,
    Ru,
}

impl Lang {
    pub fn all() -> &'static [Lang] {
        &[Lang::En, Lang::Ru]
    }

    /// Name of the language in itself
    pub fn native_name(&self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Ru => "Русский",
        }
    }
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=En (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::Ru,
        _ => Lang::En,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::En => 0,
            Lang::Ru => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.save" => if ru { "Сохранить  Ctrl+S" } else { "Save  Ctrl+S" },
        "menu.export_layout" => if ru { "Экспорт раскладки..." } else { "Export layout..." },
        "menu.export_title" => if ru { "Экспорт раскладки JSON" } else { "Export layout JSON" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.chart" => if ru { "Схема" } else { "Chart" },
        "menu.toggle_mode" => if ru { "Сменить режим  M" } else { "Toggle mode  M" },
        "menu.clear_selections" => if ru { "Снять выделение  Esc" } else { "Clear selections  Esc" },
        "menu.reset_positions" => if ru { "Сбросить позиции" } else { "Reset positions" },
        "menu.set_default" => if ru { "Сделать раскладкой по умолчанию" } else { "Set as default layout" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.summary" => if ru { "Текущее выделение" } else { "Current selections" },
        "menu.language" => if ru { "Язык" } else { "Language" },
        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },

        // ── Toolbar ─────────────────────────────────────────
        "tb.mode" => if ru { "Режим" } else { "Mode" },
        "tb.save" => if ru { "Сохранить" } else { "Save" },
        "tb.clear" => if ru { "Снять выделение" } else { "Clear" },
        "tb.more_tip" => if ru { "Другие действия" } else { "More actions" },

        // ── Modes ───────────────────────────────────────────
        "mode.select" => if ru { "Выбор" } else { "Select" },
        "mode.manipulate" => if ru { "Перемещение" } else { "Manipulate" },

        // ── Status bar ──────────────────────────────────────
        "status.loading" => if ru { "Загрузка..." } else { "Loading..." },
        "status.ready" => if ru { "Готово" } else { "Ready" },
        "status.selected" => if ru { "Выбрано" } else { "Selected" },
        "status.modified" => if ru { "Изменено" } else { "Modified" },
        "status.saving" => if ru { "Сохранение..." } else { "Saving..." },
        "status.promoting" => if ru { "Обновление раскладки..." } else { "Updating default layout..." },

        // ── Chart ───────────────────────────────────────────
        "chart.loading" => if ru { "Загрузка схемы..." } else { "Loading chart..." },
        "chart.upper" => if ru { "Верхняя челюсть" } else { "Upper arch" },
        "chart.lower" => if ru { "Нижняя челюсть" } else { "Lower arch" },

        "part.tooth" => if ru { "Зуб" } else { "Tooth" },
        "part.crown" => if ru { "Коронка" } else { "Crown" },
        "part.root" => if ru { "Корень" } else { "Root" },
        "part.selected" => if ru { "Выбрано" } else { "Selected" },
        "part.shape" => if ru { "Форма" } else { "Shape" },
        "part.unavailable" => if ru { "нет" } else { "n/a" },

        "hint.select" => if ru { "клик для выбора" } else { "click to select" },
        "hint.manipulate" => if ru {
            "перетащите для перемещения, колесо для масштаба, ПКМ для формы, Q/E для поворота"
        } else {
            "drag to move, wheel to resize, right-click to change shape, Q/E to rotate"
        },

        // ── Tooth menu ──────────────────────────────────────
        "missing.entire" => if ru { "Отметить зуб отсутствующим" } else { "Mark tooth missing" },
        "missing.crown" => if ru { "Отметить коронку отсутствующей" } else { "Mark crown missing" },
        "missing.root" => if ru { "Отметить корень отсутствующим" } else { "Mark root missing" },
        "missing.none" => if ru { "Восстановить зуб" } else { "Restore tooth" },
        "missing.badge" => if ru { "отсутствует" } else { "missing" },

        // ── Selection summary ───────────────────────────────
        "summary.title" => if ru { "Текущее выделение" } else { "Current Selections" },
        "summary.empty" => if ru { "Ничего не выбрано" } else { "Nothing selected" },

        // ── Notices ─────────────────────────────────────────
        "notice.saved" => if ru { "Выделение сохранено" } else { "Selections saved" },
        "notice.save_failed" => if ru { "Не удалось сохранить" } else { "Save failed" },
        "notice.defaults_updated" => if ru { "Раскладка по умолчанию обновлена" } else { "Default layout updated" },
        "notice.promote_failed" => if ru { "Не удалось обновить раскладку" } else { "Could not update default layout" },
        "notice.load_failed" => if ru { "Не удалось загрузить" } else { "Could not load" },
        "notice.dismiss" => if ru { "Закрыть" } else { "Dismiss" },

        "promote.title" => if ru { "Раскладка не сохранена" } else { "Default layout not saved" },
        "promote.help" => if ru {
            "Скопируйте значения, чтобы не потерять их:"
        } else {
            "Copy these values to keep them:"
        },
        "promote.positions" => if ru { "Позиции" } else { "Positions" },
        "promote.transforms" => if ru { "Трансформации" } else { "Transforms" },
        "promote.copy" => if ru { "Копировать" } else { "Copy" },
        "promote.save_file" => if ru { "Сохранить в файл..." } else { "Save to file..." },

        // ── Settings ────────────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.server" => if ru { "Адрес сервера" } else { "Server URL" },
        "settings.restart" => if ru { "Вступит в силу после перезапуска" } else { "Takes effect after restart" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}
