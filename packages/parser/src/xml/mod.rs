//! XML utilities for navigating activity trees and capturing raw XML.

mod canonical;
mod utils;

pub use canonical::canonicalize;
pub use utils::{
    find_by_path, find_child, find_children, get_attribute, get_tag_name, get_text, has_tag,
    narrative_text, XML_NAMESPACE,
};
