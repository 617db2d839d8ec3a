mod csv;
mod validator;

pub use csv::CsvConnector;
pub use validator::DataValidator;
