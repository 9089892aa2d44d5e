//! Action ids for Idle Commerce click targets.
//!
//! Registered by `render` and dispatched through `InputEvent::Click`.

// ── Start screen ───────────────────────────────────────────────
pub const START_NEW: u16 = 1;
pub const CONTINUE_SAVE: u16 = 2;
pub const IMPORT_SAVE: u16 = 3;

// ── Tab bar (base + Tab::index) ────────────────────────────────
pub const TAB_BASE: u16 = 10;

// ── Store actions ──────────────────────────────────────────────
pub const MANUAL_SALE: u16 = 20;

/// base + catalog index
pub const BUY_SHOP_UPGRADE_BASE: u16 = 100;
pub const BUY_PRODUCT_BASE: u16 = 200;
pub const SELL_PRODUCT_BASE: u16 = 250;
pub const HIRE_BASE: u16 = 300;
pub const CLAIM_MISSION_BASE: u16 = 400;
pub const CLAIM_ALL_MISSIONS: u16 = 499;
pub const BUY_PERK_BASE: u16 = 500;
pub const PRESTIGE_RESET: u16 = 550;

// ── Info tab ───────────────────────────────────────────────────
pub const EXPORT_SAVE: u16 = 600;
pub const IMPORT_FROM_INFO: u16 = 601;
pub const RESET_GAME: u16 = 602;

// ── Confirmation prompt ────────────────────────────────────────
pub const CONFIRM_YES: u16 = 700;
pub const CONFIRM_NO: u16 = 701;

/// Keys that sell one unit from the Products tab, in catalog order.
pub const SELL_KEYS: [char; 3] = ['q', 'w', 'e'];

/// Key for a 0-based list position: '1'..='9'.
pub fn digit_key(index: usize) -> char {
    char::from_digit(index as u32 + 1, 10).unwrap_or('?')
}

/// List position for a digit key.
pub fn digit_index(key: char) -> Option<usize> {
    match key.to_digit(10) {
        Some(d) if d >= 1 => Some(d as usize - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_keys_roundtrip() {
        for i in 0..9 {
            assert_eq!(digit_index(digit_key(i)), Some(i));
        }
        assert_eq!(digit_index('0'), None);
        assert_eq!(digit_index('a'), None);
    }
}
