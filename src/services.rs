mod posts;

pub use posts::PostCache;
