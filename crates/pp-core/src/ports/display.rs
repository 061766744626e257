/// Answers whether more than one display is currently attached.
///
/// Queried at launch time, never cached by callers.
pub trait DisplayPort: Send + Sync {
    fn has_multiple_displays(&self) -> bool;
}
