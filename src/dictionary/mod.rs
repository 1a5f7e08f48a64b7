//! Dictionary collaborators: the bundled word list, the remote
//! dictionary service, and the resolved set the engine consults.

mod error;
mod remote;
mod resolved;
mod word_list;

pub use error::DictionaryError;
pub use remote::{Definition, RemoteDictionary, WordOracle, define, singular_form};
pub use resolved::ResolvedDictionary;
pub use word_list::{FALLBACK_WORDS, WordList};
