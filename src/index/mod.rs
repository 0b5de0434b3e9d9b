pub mod term_index;
pub mod concurrent_map;
