pub mod assistant;
pub mod classifier;
pub mod intents;
pub mod responses;

pub use assistant::PatientAssistant;
pub use classifier::KeywordClassifier;
pub use responses::ResponseTemplates;
