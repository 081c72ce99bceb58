//! Fixed keyword lexicons for headline scoring
//!
//! Process-wide read-only configuration: constructed once at compile time
//! and never reassigned. Weights are tiered 15/12/10/5 on the positive side
//! with mirrored negatives.

/// Positive keyword weights
pub const POSITIVE: &[(&str, i32)] = &[
    // Strong momentum and record moves
    ("surge", 15),
    ("soar", 15),
    ("skyrocket", 15),
    ("breakthrough", 15),
    ("record high", 15),
    ("beat", 12),
    ("beats", 12),
    ("exceed", 12),
    ("exceeds", 12),
    ("outperform", 12),
    // Moderate gains and growth
    ("rise", 10),
    ("rises", 10),
    ("gain", 10),
    ("gains", 10),
    ("jump", 10),
    ("jumps", 10),
    ("rally", 10),
    ("rallies", 10),
    ("climb", 10),
    ("climbs", 10),
    ("boost", 10),
    ("upgrade", 10),
    ("upgrades", 10),
    ("bullish", 10),
    ("growth", 10),
    ("profit", 10),
    // Mild positives
    ("up", 5),
    ("higher", 5),
    ("positive", 5),
    ("strong", 5),
    ("buy", 5),
    ("recover", 5),
    ("recovery", 5),
    ("improve", 5),
    ("expansion", 5),
    ("deal", 5),
    ("partnership", 5),
    ("innovation", 5),
    ("launch", 5),
    ("success", 5),
    ("win", 5),
];

/// Negative keyword weights (already negated)
pub const NEGATIVE: &[(&str, i32)] = &[
    // Crashes, scandals and legal trouble
    ("crash", -15),
    ("plunge", -15),
    ("collapse", -15),
    ("scandal", -15),
    ("fraud", -15),
    ("bankruptcy", -15),
    ("lawsuit", -15),
    ("investigation", -15),
    // Moderate declines and losses
    ("fall", -10),
    ("falls", -10),
    ("drop", -10),
    ("drops", -10),
    ("decline", -10),
    ("declines", -10),
    ("tumble", -10),
    ("sink", -10),
    ("sinks", -10),
    ("slump", -10),
    ("downgrade", -10),
    ("downgrades", -10),
    ("bearish", -10),
    ("loss", -10),
    ("losses", -10),
    // Mild negatives
    ("down", -5),
    ("lower", -5),
    ("negative", -5),
    ("weak", -5),
    ("sell", -5),
    ("concern", -5),
    ("concerns", -5),
    ("risk", -5),
    ("risks", -5),
    ("warning", -5),
    ("cut", -5),
    ("cuts", -5),
    ("layoff", -5),
    ("layoffs", -5),
    ("miss", -5),
    ("misses", -5),
];
