// SPDX-License-Identifier: MPL-2.0
//! Status indicator rendering.

use crate::application::port::{StatusDisplay, StatusView};
use crate::domain::session::{initials, AuthSnapshot};

/// Status text while a token is stored.
pub const SIGNED_IN: &str = "Signed in";
/// Status text without a token.
pub const NOT_SIGNED_IN: &str = "Not signed in";

const ACCOUNT: &str = "Account";

/// Computes the status indicator for an authentication snapshot.
///
/// ```
/// use authbar::domain::session::AuthSnapshot;
/// use authbar::ui::auth_panel::status_display;
///
/// let status = status_display(&AuthSnapshot::signed_in(Some("Ada Lovelace".into())));
/// assert_eq!(status.account_label, "Account · Ada Lovelace");
/// assert_eq!(status.avatar_initials.as_deref(), Some("AL"));
/// ```
#[must_use]
pub fn status_display(snapshot: &AuthSnapshot) -> StatusDisplay {
    let name = snapshot
        .display_name
        .as_deref()
        .filter(|_| snapshot.is_authenticated);

    StatusDisplay {
        status_text: if snapshot.is_authenticated {
            SIGNED_IN
        } else {
            NOT_SIGNED_IN
        },
        login_visible: !snapshot.is_authenticated,
        logout_visible: snapshot.is_authenticated,
        account_label: match name {
            Some(name) if !name.trim().is_empty() => format!("{ACCOUNT} · {}", name.trim()),
            _ => ACCOUNT.to_string(),
        },
        avatar_initials: name.map(initials),
    }
}

/// Re-renders the status indicator.
///
/// Safe to call redundantly: the output depends on `snapshot` only.
pub fn update_auth_ui(view: &mut impl StatusView, snapshot: &AuthSnapshot) {
    view.render_status(&status_display(snapshot));
}
