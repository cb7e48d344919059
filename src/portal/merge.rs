//! Property merge for declared portal content.

use crate::node::{Children, VNode};
use crate::props::Props;

/// Merge `overrides` into every element-bearing child of `declared`
///
/// Elements and components get `declared ∪ overrides` with overrides
/// winning; text, null, portal and external children pass through as-is.
/// All children receive the same overrides. Returns new descriptions; the
/// declared slice is left untouched.
pub fn merge_children(declared: &[VNode], overrides: &Props) -> Children {
    declared
        .iter()
        .map(|child| child.with_merged_props(overrides))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Element;
    use crate::props;

    #[test]
    fn test_merge_all_element_children() {
        let declared = [
            VNode::from(Element::new("p").prop("label", "default")),
            VNode::from(Element::new("span")),
        ];
        let merged = merge_children(&declared, &props! { "label" => "x" });

        for child in &merged {
            assert_eq!(child.props().and_then(|p| p.get_str("label")), Some("x"));
        }
        assert_eq!(
            declared[0].props().and_then(|p| p.get_str("label")),
            Some("default")
        );
        assert!(declared[1].props().is_some_and(Props::is_empty));
    }

    #[test]
    fn test_non_element_children_untouched() {
        let declared = [VNode::text("plain"), VNode::Null];
        let merged = merge_children(&declared, &props! { "label" => "x" });

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].as_text().map(|t| t.content.as_str()), Some("plain"));
        assert!(merged[1].is_null());
    }

    #[test]
    fn test_merge_with_empty_overrides_is_identity() {
        let declared = [VNode::from(Element::new("p").prop("a", 1))];
        let merged = merge_children(&declared, &Props::new());
        assert_eq!(merged[0].props(), declared[0].props());
    }
}
