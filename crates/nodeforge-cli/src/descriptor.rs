//! Tool identity shown by `--version` and the help menu.

use std::sync::LazyLock;

/// Name, version, authors and description, read once from the package
/// metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub version: &'static str,
    pub authors: Vec<&'static str>,
    pub description: &'static str,
}

pub static DESCRIPTOR: LazyLock<ToolDescriptor> = LazyLock::new(|| ToolDescriptor {
    name: "nodeforge",
    version: env!("CARGO_PKG_VERSION"),
    authors: env!("CARGO_PKG_AUTHORS")
        .split(':')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect(),
    description: env!("CARGO_PKG_DESCRIPTION"),
});

impl ToolDescriptor {
    /// `nodeforge 0.1.0`
    pub fn title(&self) -> String {
        format!("{} {}", self.name, self.version)
    }

    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_matches_package() {
        assert_eq!(DESCRIPTOR.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(DESCRIPTOR.title(), format!("nodeforge {}", env!("CARGO_PKG_VERSION")));
        assert!(!DESCRIPTOR.authors.is_empty());
        assert!(!DESCRIPTOR.description.is_empty());
    }
}
