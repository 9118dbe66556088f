//! Probe screens.
//!
//! Both probe screens share one state machine: `Idle` while `in_flight` is
//! `None`, `InFlight` while it holds the id of the outstanding request.
//! Only the form layout, the request built on submit and the result type
//! differ between them.

use crate::probe::{DnsLookupResult, PortCheckResult, ProbeRequest, RequestId};
use crate::tui::event::Action;
use crate::tui::form::{Field, Form, HOST_MAX_LEN, PORT_MAX_LEN};

/// Field index of the first DNS server.
pub const DNS_SERVER_1: usize = 0;
/// Field index of the second DNS server.
pub const DNS_SERVER_2: usize = 1;
/// Field index of the name to resolve.
pub const DNS_NAME: usize = 2;

/// Field index of the target host.
pub const PORT_HOST: usize = 0;
/// Field index of the target port.
pub const PORT_PORT: usize = 1;

/// State owned by one probe screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState<R> {
    form: Form,
    in_flight: Option<RequestId>,
    last_result: Option<R>,
}

/// Dual-server DNS lookup screen.
pub type DnsScreen = ScreenState<DnsLookupResult>;
/// TCP port check screen.
pub type PortScreen = ScreenState<PortCheckResult>;

impl<R> ScreenState<R> {
    /// Idle screen with no result yet.
    #[must_use]
    pub fn new(form: Form) -> Self {
        Self {
            form,
            in_flight: None,
            last_result: None,
        }
    }

    /// The screen's input form.
    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Id of the outstanding request, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Most recent completed result.
    #[must_use]
    pub fn last_result(&self) -> Option<&R> {
        self.last_result.as_ref()
    }

    /// Apply a navigation or editing key.
    ///
    /// Editing is allowed while a request is in flight; the request already
    /// holds its own copy of the inputs.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::NextField | Action::Down => self.form.focus_next(),
            Action::PrevField | Action::Up => self.form.focus_prev(),
            Action::Input(c) => self.form.input(c),
            Action::Backspace => self.form.backspace(),
            Action::Submit | Action::Back | Action::Quit => {}
        }
    }

    /// Try to start a request.
    ///
    /// Rejected (returns `None`, state untouched) while a request is in
    /// flight or when any field is blank. Otherwise the screen moves to
    /// `InFlight` under `id` and the request built from the trimmed field
    /// values is returned.
    pub fn submit(
        &mut self,
        id: RequestId,
        build: impl FnOnce(&[String]) -> ProbeRequest,
    ) -> Option<ProbeRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let values = self.form.filled_values()?;
        self.in_flight = Some(id);
        Some(build(&values))
    }

    /// Merge the result of request `id`.
    ///
    /// Only a completion of the request this screen is waiting on is
    /// applied; anything else is stale and dropped. Returns whether the
    /// result was applied.
    pub fn complete(&mut self, id: RequestId, result: R) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }
        self.in_flight = None;
        self.last_result = Some(result);
        true
    }
}

/// Fresh DNS lookup screen with both server fields pre-filled.
#[must_use]
pub fn dns_screen(servers: &[String; 2]) -> DnsScreen {
    let fields = vec![
        Field::new("DNS SERVER 1", "1.1.1.1", HOST_MAX_LEN).with_value(servers[0].as_str()),
        Field::new("DNS SERVER 2", "8.8.8.8", HOST_MAX_LEN).with_value(servers[1].as_str()),
        Field::new("HOSTNAME", "example.com", HOST_MAX_LEN),
    ];
    ScreenState::new(Form::new(fields, DNS_NAME))
}

/// Fresh port check screen with empty fields.
#[must_use]
pub fn port_screen() -> PortScreen {
    let fields = vec![
        Field::new("TARGET ADDRESS", "192.168.1.1  or  hostname", HOST_MAX_LEN),
        Field::new("PORT", "80", PORT_MAX_LEN),
    ];
    ScreenState::new(Form::new(fields, PORT_HOST))
}

/// Build a DNS request from the DNS screen's values.
#[must_use]
pub fn dns_request(values: &[String]) -> ProbeRequest {
    ProbeRequest::dns(
        values[DNS_SERVER_1].as_str(),
        values[DNS_SERVER_2].as_str(),
        values[DNS_NAME].as_str(),
    )
}

/// Build a port request from the port screen's values.
#[must_use]
pub fn port_request(values: &[String]) -> ProbeRequest {
    ProbeRequest::port(values[PORT_HOST].as_str(), values[PORT_PORT].as_str())
}
