//! Tree rendering for plan diagnostics

/// Renders a node header followed by its (possibly multi-line) children
///
/// ```text
/// CrossJoin
///  ├─ ResolvedTable(a)
///  └─ ResolvedTable(b)
/// ```
#[derive(Debug, Default)]
pub struct TreePrinter {
    header: String,
    children: Vec<String>,
}

impl TreePrinter {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: impl Into<String>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn render(&self) -> String {
        let mut out = self.header.clone();
        let count = self.children.len();

        for (i, child) in self.children.iter().enumerate() {
            let last = i + 1 == count;
            for (j, line) in child.lines().enumerate() {
                let prefix = match (j == 0, last) {
                    (true, false) => " ├─ ",
                    (true, true) => " └─ ",
                    (false, false) => " │  ",
                    (false, true) => "    ",
                };
                out.push('\n');
                out.push_str(prefix);
                out.push_str(line);
            }
        }

        out
    }
}
