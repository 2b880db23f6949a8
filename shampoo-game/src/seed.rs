//! Share codes so a schedule can be replayed by name.
//! Code format: SH-<WORD><NN>, e.g., SH-LATHER42, SH-FRIZZ07
//!
//! Codes name the seeds `0..CODE_SPACE` one to one: the word picks the
//! hundreds, the two digits the remainder. Larger seeds have no code.

const SHARE_PREFIX: &str = "SH";
const SUFFIXES_PER_WORD: u64 = 100;

// Word list for share codes
pub const WORD_LIST: [&str; 64] = [
    "LATHER", "RINSE", "REPEAT", "FRIZZ", "CURL", "BRAID", "BANGS", "BOB", "MULLET", "MOHAWK",
    "BUN", "BRUSH", "COMB", "DRYER", "TOWEL", "SUDS", "FOAM", "BUBBLE", "SILK", "SHINE", "GLOSS",
    "OIL", "GREASE", "SLICK", "MOUSSE", "GEL", "SPRAY", "MIST", "RAIN", "HUMID", "STORM", "CLOUD",
    "PEAK", "FRESH", "CLEAN", "TEXTURE", "VOLUME", "ROOTS", "ENDS", "SPLIT", "TRIM", "FADE",
    "PERM", "DYE", "HIGHLITE", "BLONDE", "AUBURN", "RAVEN", "COPPER", "SALON", "MIRROR", "CLIP",
    "PIN", "TWIST", "WAVE", "FRINGE", "PLAIT", "TOPKNOT", "COWLICK", "SCALP", "FOLLICLE", "KERATIN",
    "CONDITION", "BALM",
];

/// Number of seeds that have a share code.
pub const CODE_SPACE: u64 = WORD_LIST.len() as u64 * SUFFIXES_PER_WORD;

fn render(seed: u64) -> Option<String> {
    let word = WORD_LIST.get(usize::try_from(seed / SUFFIXES_PER_WORD).ok()?)?;
    let nn = seed % SUFFIXES_PER_WORD;
    Some(format!("{SHARE_PREFIX}-{word}{nn:02}"))
}

/// Render the share code for a seed, or `None` when the seed is outside
/// [`CODE_SPACE`].
#[must_use]
pub fn encode_friendly(seed: u64) -> Option<String> {
    render(seed)
}

/// Parse a share code back into the seed it names.
#[must_use]
pub fn decode_to_seed(code: &str) -> Option<u64> {
    let (prefix, rest) = code.trim().split_once('-')?;
    if !prefix.eq_ignore_ascii_case(SHARE_PREFIX) || !rest.is_ascii() || rest.len() < 3 {
        return None;
    }
    let (word_part, nn_part) = rest.split_at(rest.len() - 2);
    if !nn_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let nn: u64 = nn_part.parse().ok()?;
    let idx = WORD_LIST
        .iter()
        .position(|w| w.eq_ignore_ascii_case(word_part))?;
    Some(u64::try_from(idx).ok()? * SUFFIXES_PER_WORD + nn)
}

/// Draw a valid share code from arbitrary entropy.
#[must_use]
pub fn generate_code_from_entropy(entropy: u64) -> String {
    let seed = entropy % CODE_SPACE;
    render(seed).unwrap_or_else(|| format!("{SHARE_PREFIX}-{}00", WORD_LIST[0]))
}

/// Every code the scheme can express, in seed order.
pub fn all_share_codes() -> impl Iterator<Item = String> {
    (0..CODE_SPACE).filter_map(render)
}
