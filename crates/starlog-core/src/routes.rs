// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! URL paths shared by the client and the gateway.

use crate::types::ObservationKey;

/// Default observation list page.
pub const LIST_PATH: &str = "/observations/list/";

/// Add-observation flow.
pub const ADD_PATH: &str = "/observations/add/";

/// Observing sessions collection.
pub const SESSIONS_PATH: &str = "/sessions/";

/// Header marking programmatic (non-navigation) list requests.
pub const AJAX_HEADER: &str = "X-Requested-With";

/// Value sent with [`AJAX_HEADER`].
pub const AJAX_HEADER_VALUE: &str = "XMLHttpRequest";

/// Header carrying the forgery-protection token.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Name of the hidden form field carrying the forgery-protection token.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

pub fn detail_path(key: &ObservationKey) -> String {
    format!("/observations/detail/{}/{}/", key.type_class, key.id)
}

pub fn delete_path(key: &ObservationKey) -> String {
    format!("/observations/delete/{}/{}/", key.type_class, key.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObservationType;

    #[test]
    fn paths_embed_type_and_id() {
        let key = ObservationKey::new(ObservationType::DeepSky, 12);
        assert_eq!(detail_path(&key), "/observations/detail/deepsky/12/");
        assert_eq!(delete_path(&key), "/observations/delete/deepsky/12/");
    }
}
