//! Building blocks for reading canvas sheets: text normalization, header
//! and column location, column/table readers and the field extractors.

pub mod address;
pub mod block;
pub mod locate;
pub mod normalize;
pub mod team;
pub mod values;

pub use address::extract_address;
pub use block::{pick_neighbor_value, read_block_and_table, read_column_block, BlockAndTable};
pub use locate::{find_col_index, find_row_index_by_titles};
pub use normalize::{clean, norm, prettify_title};
pub use team::{build_team_content, parse_team_block, TeamBlock};
