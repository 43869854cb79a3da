use indexmap::IndexMap;

/// All (x, y) points for one named benchmark across the report's sections.
///
/// The two sequences are parallel and always grow together, one point per
/// section visit, in section-encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Series {
    pub fn push(&mut self, x: f64, y: f64) {
        self.xs.push(x);
        self.ys.push(y);
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Fully parsed report document, ready for rendering.
///
/// Series keys appear in first-seen order across the document. Populated in
/// a single pass by the parser and not mutated afterward.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub xlabel: Option<String>,
    pub xtick: Option<f64>,
    pub data: IndexMap<String, Series>,
}
