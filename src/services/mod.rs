pub mod analyzer;
pub mod catalog;
pub mod enhancer;
pub mod narrative;
pub mod posters;
pub mod ranking;
pub mod recommender;
pub mod synopsis;
pub mod text;
pub mod vocabulary;
