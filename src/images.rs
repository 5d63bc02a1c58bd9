use kuchiki::NodeRef;

use crate::dom;

/// One pass over the `<img>` elements present now: constrain each to its
/// container's width and let the height follow. Images inserted later are
/// not touched. Returns the number of images updated.
pub fn fix_images(document: &NodeRef) -> usize {
    let Ok(images) = document.select("img") else {
        return 0;
    };
    let mut fixed = 0;
    for img in images {
        let node = img.as_node();
        dom::set_style_property(node, "max-width", "100%");
        dom::set_style_property(node, "height", "auto");
        fixed += 1;
    }
    tracing::debug!(fixed, "responsive images applied");
    fixed
}
