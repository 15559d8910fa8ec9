mod parse;
mod record;
mod sim_pair;
mod store;

pub use parse::{load_corpus, parse_corpus};
pub use record::{Article, Category};
pub use sim_pair::{MAX_PAIR_ID, MAX_PAIR_SIM, SIM_SCALE, SimPair, decode, encode};
pub use store::{InMemoryStore, SimilarityStore};
