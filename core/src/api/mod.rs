pub mod classifier;
pub mod file;
pub mod gateway;
pub mod model;

pub use classifier::{Classifier, KeywordClassifier};
pub use file::FileRemoteGateway;
pub use gateway::RemoteGateway;
pub use model::RemoteTask;
