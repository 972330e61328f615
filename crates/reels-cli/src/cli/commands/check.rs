//! `reels check <link>` – validate a link without prompting.

use reels_core::config::ReelsConfig;
use reels_core::validator::LinkValidator;

pub fn run_check(cfg: &ReelsConfig, link: &str) {
    let validator = LinkValidator::new(cfg.host_pattern);
    match validator.classify(link) {
        Some(host) => println!("valid ({host})"),
        None => println!("invalid"),
    }
}
