pub const GET_VERSION: &[u8] = b"<GETVER>>";
pub const GET_CPM: &[u8] = b"<GETCPM>>";
pub const GET_CPS: &[u8] = b"<GETCPS>>";
pub const GET_CPML: &[u8] = b"<GETCPML>>";
pub const GET_CPMH: &[u8] = b"<GETCPMH>>";
pub const GET_CPSL: &[u8] = b"<GETCPSL>>";
pub const GET_CPSH: &[u8] = b"<GETCPSH>>";

/// Counter values requested once per poll cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measurement {
    /// Counts per minute, both tubes combined
    Cpm,
    /// Counts per second, both tubes combined
    Cps,
    /// Counts per minute of the 1st (high sensitivity) tube
    CpmTube1,
    /// Counts per minute of the 2nd (low sensitivity) tube
    CpmTube2,
    /// Counts per second of the 1st tube
    CpsTube1,
    /// Counts per second of the 2nd tube
    CpsTube2,
}

impl Measurement {
    /// Order in which a poll cycle issues the commands.
    pub const POLL_ORDER: [Measurement; 6] = [
        Measurement::Cpm,
        Measurement::Cps,
        Measurement::CpmTube1,
        Measurement::CpmTube2,
        Measurement::CpsTube1,
        Measurement::CpsTube2,
    ];

    pub fn command(&self) -> &'static [u8] {
        match self {
            Measurement::Cpm => GET_CPM,
            Measurement::Cps => GET_CPS,
            Measurement::CpmTube1 => GET_CPML,
            Measurement::CpmTube2 => GET_CPMH,
            Measurement::CpsTube1 => GET_CPSL,
            Measurement::CpsTube2 => GET_CPSH,
        }
    }

    /// CPS replies carry tube-status flags in their highest bits.
    pub fn masks_status_bits(&self) -> bool {
        match self {
            Measurement::Cps | Measurement::CpsTube1 | Measurement::CpsTube2 => true,
            Measurement::Cpm | Measurement::CpmTube1 | Measurement::CpmTube2 => false,
        }
    }
}
