//! Entry, schema and result types shared by every backend.

mod field;
mod item;
mod result;

pub use field::FieldData;
pub use item::{Entry, ID_FIELD, Item, entry_id, normalize_ids};
pub use result::{ChangeResult, CollectionData, RetrievalInfo, RetrievalResult, SUCCESS_MESSAGE};
