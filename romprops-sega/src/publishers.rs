//! Sega third-party publisher ("T-code") lookup table.
//!
//! Licensed third-party discs carry a maker ID of the form `SEGA TP T-nnn`.
//! The number is the publisher's Sega licensee code, shared with the
//! Mega Drive `(C)T-nnn` copyright line.

/// Look up a publisher name from a third-party T-code.
pub(crate) fn third_party_name(code: u32) -> Option<&'static str> {
    match code {
        1 => Some("Sega"),
        10 => Some("Takara"),
        11 => Some("Taito"),
        12 => Some("Capcom"),
        13 => Some("Data East"),
        14 => Some("Namco"),
        15 => Some("Sunsoft"),
        16 => Some("Bandai"),
        17 => Some("Dempa"),
        18 => Some("Technosoft"),
        19 => Some("Technosoft"),
        20 => Some("Asmik"),
        22 => Some("Micronet"),
        23 => Some("Vic Tokai"),
        24 => Some("American Sammy"),
        25 => Some("NCS"),
        26 => Some("Sigma Enterprises"),
        28 => Some("Toho"),
        29 => Some("Kyugo"),
        32 => Some("Wolfteam"),
        33 => Some("Kaneko"),
        35 => Some("Toaplan"),
        36 => Some("Tecmo"),
        38 => Some("Hot-B"),
        40 => Some("Toaplan"),
        41 => Some("Unipac"),
        42 => Some("UFL Company Limited"),
        43 => Some("Human"),
        45 => Some("Game Arts"),
        46 => Some("Hiro"),
        47 => Some("Sage's Creation"),
        48 => Some("Tengen"),
        49 => Some("Renovation"),
        50 => Some("Electronic Arts"),
        56 => Some("Razorsoft"),
        58 => Some("Mentrix"),
        60 => Some("Victor Musical Industries"),
        68 => Some("Extreme"),
        69 => Some("Arena"),
        70 => Some("Virgin Interactive"),
        73 => Some("Soft Vision"),
        74 => Some("Palsoft"),
        76 => Some("Koei"),
        79 => Some("U.S. Gold"),
        81 => Some("Acclaim"),
        83 => Some("GameTek"),
        86 => Some("Absolute Entertainment"),
        87 => Some("Mindscape"),
        93 => Some("Sony"),
        95 => Some("Konami"),
        97 => Some("Tradewest"),
        100 => Some("THQ"),
        101 => Some("Tecmagik"),
        106 => Some("Working Designs"),
        112 => Some("Designer Software"),
        113 => Some("Psygnosis"),
        115 => Some("Core Design"),
        119 => Some("Accolade"),
        120 => Some("Codemasters"),
        123 => Some("Time Warner Interactive"),
        125 => Some("Interplay"),
        127 => Some("Domark"),
        130 => Some("Activision"),
        132 => Some("Playmates Interactive"),
        137 => Some("Hudson Soft"),
        139 => Some("BMG Interactive"),
        144 => Some("Atlus"),
        145 => Some("Takara"),
        149 => Some("Imagineer"),
        151 => Some("Infogrames"),
        152 => Some("Banpresto"),
        153 => Some("Ocean"),
        155 => Some("Funcom"),
        158 => Some("Titus"),
        161 => Some("Fox Interactive"),
        166 => Some("Eidos Interactive"),
        173 => Some("GT Interactive"),
        239 => Some("Disney Interactive"),
        _ => None,
    }
}
