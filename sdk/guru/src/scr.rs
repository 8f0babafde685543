//! # BG Control Register Flags
//!
//! The BG control register (`$EB0808`) gates whether the video controller
//! reads the sprite and BG registers at all. The compositor writes
//! [`BgControl::DISABLED`] before touching any of them and
//! [`BgControl::ENABLED`] afterwards.
//!
//! | Flag          | Bit   | Effect                                  |
//! |---------------|-------|-----------------------------------------|
//! | `BG0_ON`      | 0     | Show BG plane 0                         |
//! | `BG0_TEXT_1`  | 1     | BG0 reads text area 1 (clear: area 0)   |
//! | `BG1_ON`      | 3     | Show BG plane 1                         |
//! | `BG1_TEXT_1`  | 4     | BG1 reads text area 1 (clear: area 0)   |
//! | `DISPLAY`     | 9     | Sprite/BG display on (clear: CPU access)|

bitflags::bitflags! {
    /// BG control flags at `$EB0808`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct BgControl: u16 {
        const BG0_ON     = 0b0000_0000_0000_0001;
        const BG0_TEXT_1 = 0b0000_0000_0000_0010;
        const BG1_ON     = 0b0000_0000_0000_1000;
        const BG1_TEXT_1 = 0b0000_0000_0001_0000;
        /// Video controller owns the sprite/BG registers while set.
        const DISPLAY    = 0b0000_0010_0000_0000;
    }
}

impl BgControl {
    /// Everything off: registers may be rewritten without tearing.
    pub const DISABLED: Self = Self::empty();

    /// Display on, BG0 on and fed from text area 1 (`0x0203`).
    pub const ENABLED: Self = Self::DISPLAY.union(Self::BG0_ON).union(Self::BG0_TEXT_1);
}
