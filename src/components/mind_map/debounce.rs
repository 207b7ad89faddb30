//! Cancel-and-restart bookkeeping for the resize timer.
//!
//! Each request hands out a ticket and invalidates every earlier one, so only
//! the timer scheduled last can fire. The host owns the actual timer (a
//! browser `setTimeout`) and clears the previous one when it schedules anew;
//! the tickets make a late callback from a cleared timer harmless anyway.

use std::time::Duration;

/// Identifies one scheduled firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// At most one pending value, replaced on every request.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
	delay: Duration,
	generation: u64,
	pending: Option<T>,
}

impl<T> Debounce<T> {
	/// Empty debouncer whose host timer waits `delay`.
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			generation: 0,
			pending: None,
		}
	}

	/// Delay the host timer should use.
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Replaces the pending value and returns the ticket the new timer must carry.
	pub fn request(&mut self, value: T) -> Ticket {
		self.generation += 1;
		self.pending = Some(value);
		Ticket(self.generation)
	}

	/// Takes the pending value if `ticket` is the most recent one.
	pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
		if ticket.0 != self.generation {
			return None;
		}
		self.pending.take()
	}

	/// Drops the pending value; outstanding tickets fire as no-ops.
	pub fn cancel(&mut self) {
		self.generation += 1;
		self.pending = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_latest_ticket_fires() {
		let mut d = Debounce::new(Duration::from_millis(100));
		let first = d.request(1);
		let second = d.request(2);
		assert_eq!(d.fire(first), None);
		assert_eq!(d.fire(second), Some(2));
	}

	#[test]
	fn ticket_fires_once() {
		let mut d = Debounce::new(Duration::from_millis(100));
		let ticket = d.request("size");
		assert_eq!(d.fire(ticket), Some("size"));
		assert_eq!(d.fire(ticket), None);
	}

	#[test]
	fn cancel_invalidates_outstanding_ticket() {
		let mut d = Debounce::new(Duration::from_millis(100));
		let ticket = d.request(());
		d.cancel();
		assert_eq!(d.fire(ticket), None);
		assert_eq!(d.delay(), Duration::from_millis(100));
	}
}
