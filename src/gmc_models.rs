/// Counters (model and firmware) answering CPM/CPS commands with 4 bytes.
/// Every other counter answers with 2 bytes.
pub const FOUR_BYTE_SIGNATURES: [&str; 2] = ["GMC-500+Re 1.18", "GMC-500+Re 1.21"];

pub fn default_four_byte_signatures() -> Vec<String> {
    FOUR_BYTE_SIGNATURES.iter().map(|s| s.to_string()).collect()
}
