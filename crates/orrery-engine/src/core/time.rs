/// Wall-clock receipt times of the two held snapshots, in milliseconds.
///
/// Produces the interpolation alpha for a render sample. Display runs one
/// receipt interval behind the newest snapshot: the motion from `previous`
/// to `next` is played back over the interval that follows `next`'s
/// arrival, so alpha reaches 1 roughly when the following snapshot is due.
///
/// The interval is degenerate when the newer receipt is not strictly after
/// the older one (first snapshot, duplicate or out-of-order delivery). No
/// alpha exists then and callers render the newest snapshot directly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReceiptWindow {
    previous: f64,
    next: f64,
}

impl ReceiptWindow {
    /// Window collapsed onto a single receipt.
    pub fn starting_at(now: f64) -> Self {
        Self {
            previous: now,
            next: now,
        }
    }

    /// Shift `next → previous` and stamp a new receipt.
    pub fn advance(&mut self, now: f64) {
        self.previous = self.next;
        self.next = now;
    }

    pub fn previous(&self) -> f64 {
        self.previous
    }

    pub fn next(&self) -> f64 {
        self.next
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.next > self.previous)
    }

    /// Time since the newest receipt as a fraction of the receipt interval,
    /// clamped to `[0, 1]`.
    pub fn alpha(&self, now: f64) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        let alpha = (now - self.next) / (self.next - self.previous);
        alpha.is_finite().then(|| alpha.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_receipt_has_no_alpha() {
        let w = ReceiptWindow::starting_at(100.0);
        assert!(w.is_degenerate());
        assert_eq!(w.alpha(150.0), None);
    }

    #[test]
    fn alpha_is_fraction_of_interval() {
        let mut w = ReceiptWindow::starting_at(1000.0);
        w.advance(1500.0);
        assert_eq!(w.alpha(1750.0), Some(0.5));
        assert_eq!(w.alpha(1500.0), Some(0.0));
    }

    #[test]
    fn alpha_is_clamped() {
        let mut w = ReceiptWindow::starting_at(0.0);
        w.advance(100.0);
        assert_eq!(w.alpha(50.0), Some(0.0));
        assert_eq!(w.alpha(400.0), Some(1.0));
    }

    #[test]
    fn out_of_order_receipt_is_degenerate() {
        let mut w = ReceiptWindow::starting_at(200.0);
        w.advance(100.0);
        assert_eq!(w.alpha(150.0), None);
    }
}
