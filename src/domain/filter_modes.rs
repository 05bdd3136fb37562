//! FILT modes offered by the mode menu. The index is what ends up in `tmp`.

pub const FILT_MODES: [&str; 12] = [
    "set colour",
    "AND",
    "OR",
    "subtract colour",
    "red shift",
    "blue shift",
    "no effect",
    "XOR",
    "NOT",
    "old QRTZ scattering",
    "variable red shift",
    "variable blue shift",
];
