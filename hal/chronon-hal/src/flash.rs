//! Non-volatile settings page abstraction
//!
//! Models the flash controller around the reserved settings page:
//! unlock, page erase, half-word programming, and the busy /
//! end-of-operation flags the store's timeouts watch. The settings
//! store in `chronon-drivers` sequences these; the trait itself never
//! blocks.

/// Programming unit of the flash in bytes (half-word)
pub const PROGRAM_UNIT: usize = 2;

/// Flash controller for the settings page
pub trait FlashBank {
    /// Copy the stored record into `buf`. Plain memory read, always
    /// succeeds; corruption is the verifier's problem.
    fn read_record(&mut self, buf: &mut [u8]);

    /// An erase or program operation is in progress (BSY).
    fn busy(&self) -> bool;

    /// Consume the end-of-operation flag (EOP). Returns whether it was
    /// set; clears it if so.
    fn take_end_of_op(&mut self) -> bool;

    /// Write protection engaged.
    fn locked(&self) -> bool;

    /// Run the key sequence that disengages write protection.
    fn unlock(&mut self);

    /// Re-engage write protection.
    fn lock(&mut self);

    /// Start erasing the settings page.
    fn start_page_erase(&mut self);

    /// Leave page-erase mode.
    fn end_page_erase(&mut self);

    /// Enter programming mode.
    fn begin_program(&mut self);

    /// Program one half-word at `offset` bytes into the record.
    fn program_halfword(&mut self, offset: usize, value: u16);

    /// Leave programming mode.
    fn end_program(&mut self);
}
