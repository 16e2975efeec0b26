pub mod descriptor;
pub mod parser;
pub mod report;
pub mod table;

pub use descriptor::Descriptor;
pub use parser::Parser;
pub use report::ReportSizeEntry;
pub use report::ReportType;
pub use table::ReportSizeTable;
pub use table::MAX_REPORT_IDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("`Push`/`Pop` items are not supported")]
    UnsupportedFeature,
    #[error("more than {} distinct report ids", MAX_REPORT_IDS)]
    TooManyReports,
}

pub fn parse(data: &[u8]) -> Result<ReportSizeTable, Error> {
    Parser::default().parse(data)
}
