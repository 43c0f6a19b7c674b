//! Static story text, compiled in from the `data/` directory.

pub const TITLE: &str = "BLETHERIA: THE REALM OF MISFORTUNE";
pub const INTRO: &str = include_str!("../data/intro.txt");
pub const COMMAND_PRIMER: &str = include_str!("../data/primer.txt");
pub const SECRET_ENDING: &str = include_str!("../data/ending_secret.txt");
pub const GOOD_ENDING: &str = include_str!("../data/ending_good.txt");
pub const BAD_ENDING: &str = include_str!("../data/ending_bad.txt");

pub const WISDOM_CHOSEN: &str = "Excellent choice wizard. Wise you shall be.";
pub const PERCEPTION_CHOSEN: &str =
    "Interesting choice wizard. Stay alert, the realm of misfortune has many secrets to uncover.";
pub const LOST_BETWEEN_REALMS: &str = "You are lost between realms… exiting.";
