pub mod inputs;
pub mod mock_report;
