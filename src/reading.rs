use gmc_signal_parser::DecodeError;

/// Value written for a count whose reply could not be decoded.
pub const SENTINEL: i64 = -99;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type Count = Result<u32, DecodeError>;

pub fn to_value(count: &Count) -> i64 {
    match count {
        Ok(value) => *value as i64,
        Err(_) => SENTINEL,
    }
}

/// Struct to hold the counts of one poll cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    /// Cycle number, starting at 0.
    pub index: u64,
    /// Local time when the cycle started.
    pub timestamp: String,
    pub cpm: Count,
    pub cps: Count,
    /// CPM of the 1st tube.
    pub cpm1st: Count,
    /// CPM of the 2nd tube.
    pub cpm2nd: Count,
    /// CPS of the 1st tube.
    pub cps1st: Count,
    /// CPS of the 2nd tube.
    pub cps2nd: Count,
}

impl Reading {
    fn values(&self) -> [i64; 6] {
        [
            to_value(&self.cpm),
            to_value(&self.cps),
            to_value(&self.cpm1st),
            to_value(&self.cpm2nd),
            to_value(&self.cps1st),
            to_value(&self.cps2nd),
        ]
    }

    /// Line printed on the console after each cycle.
    pub fn summary(&self) -> String {
        let [cpm, cps, cpm1st, cpm2nd, cps1st, cps2nd] = self.values();
        format!(
            "{} {}, CPM={}, CPS={}, CPM1st={}, CPM2nd={}, CPS1st={}, CPS2nd={}",
            self.index, self.timestamp, cpm, cps, cpm1st, cpm2nd, cps1st, cps2nd
        )
    }

    /// Row appended to the log file, newline included.
    pub fn to_log_line(&self) -> String {
        let mut line = format!("{:7}, {:<19}", self.index, self.timestamp);
        for value in self.values() {
            line.push_str(&format!(", {:6.2}", value as f64));
        }
        line.push('\n');
        line
    }
}
