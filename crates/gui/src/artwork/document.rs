use super::paint::Paint;

/// Element categories the recolor/reshape pass cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Svg,
    Group,
    Path,
    Circle,
    Ellipse,
    Rect,
    Polygon,
    Polyline,
    Line,
    Other,
}

impl ElementKind {
    /// Classify by local (namespace-free) element name
    pub fn from_local_name(name: &str) -> Self {
        match name {
            "svg" => ElementKind::Svg,
            "g" => ElementKind::Group,
            "path" => ElementKind::Path,
            "circle" => ElementKind::Circle,
            "ellipse" => ElementKind::Ellipse,
            "rect" => ElementKind::Rect,
            "polygon" => ElementKind::Polygon,
            "polyline" => ElementKind::Polyline,
            "line" => ElementKind::Line,
            _ => ElementKind::Other,
        }
    }

    /// Shapes that carry fill and stroke
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            ElementKind::Path
                | ElementKind::Circle
                | ElementKind::Ellipse
                | ElementKind::Rect
                | ElementKind::Polygon
                | ElementKind::Polyline
                | ElementKind::Line
        )
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ElementKind::Svg | ElementKind::Group)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "miter" => Some(LineJoin::Miter),
            "round" => Some(LineJoin::Round),
            "bevel" => Some(LineJoin::Bevel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Paint-related properties, resolved from presentation attributes and `style` at parse time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
    pub stroke_width: Option<f64>,
    pub line_join: Option<LineJoin>,
    pub line_cap: Option<LineCap>,
    /// Unrelated `style` declarations, kept in source order
    pub extra: Vec<(String, String)>,
}

impl Style {
    pub fn clear_paint(&mut self) {
        self.fill = None;
        self.stroke = None;
        self.stroke_width = None;
    }
}

/// An SVG element with typed style
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Qualified name as written in the source (`path`, `svg:path`)
    pub name: String,
    pub kind: ElementKind,
    /// Non-style attributes in source order
    pub attributes: Vec<(String, String)>,
    pub style: Style,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let local = name.rsplit(':').next().unwrap_or(&name).to_string();
        Self {
            kind: ElementKind::from_local_name(&local),
            name,
            attributes: Vec::new(),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute, keeping its position if present
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Visit this element and every descendant, depth first
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(e) = child {
                e.walk_mut(f);
            }
        }
    }
}

/// Parsed tooth-part artwork. The root is always an `<svg>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    pub root: Element,
}

impl VectorDocument {
    /// No drawable content at all
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Visit every fillable/strokeable primitive
    pub fn for_each_primitive_mut(&mut self, mut f: impl FnMut(&mut Element)) {
        self.root.walk_mut(&mut |e: &mut Element| {
            if e.kind.is_primitive() {
                f(e);
            }
        });
    }

    pub fn primitives(&self) -> Vec<&Element> {
        fn collect<'a>(e: &'a Element, out: &mut Vec<&'a Element>) {
            if e.kind.is_primitive() {
                out.push(e);
            }
            for child in e.child_elements() {
                collect(child, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }
}
