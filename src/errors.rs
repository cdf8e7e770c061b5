use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptCheckError {
    #[error("bundle error: {0}")] Bundle(String),
    #[error("schema error: {0}")] Schema(String),
    #[error("report error: {0}")] Report(String),
    #[error("wizard error: {0}")] Wizard(String),
}
