//! Built-in level plans and JSON plan loading

use crate::error::Result;

/// A level plan: rows of symbols, top to bottom
pub type Plan = Vec<String>;

const PLANS: [&[&str]; 4] = [
    &[
        "         ",
        "   f     ",
        "         ",
        "       oo",
        "@     xxx",
        "         ",
        "xxxx     ",
        "         ",
    ],
    &[
        "   v     ",
        "         ",
        "         ",
        "@       o",
        "    o   x",
        "o   x    ",
        "x        ",
        "         ",
    ],
    &[
        "            ",
        "      v     ",
        "           o",
        "@       o  x",
        "    o   x   ",
        "    x       ",
        "x           ",
        "            ",
    ],
    &[
        " v           ",
        "             ",
        "             ",
        "@   h    o   ",
        "        xx   ",
        "    xx       ",
        "xx         o ",
        "      xxxxxxx",
    ],
];

/// The four stock levels, easiest first
pub fn default_plans() -> Vec<Plan> {
    PLANS
        .iter()
        .map(|plan| plan.iter().map(|row| row.to_string()).collect())
        .collect()
}

/// Decode plans from a JSON array of arrays of row strings
pub fn plans_from_json(json: &str) -> Result<Vec<Plan>> {
    let plans: Vec<Plan> = serde_json::from_str(json)?;
    log::info!("Loaded {} level plans", plans.len());
    Ok(plans)
}
