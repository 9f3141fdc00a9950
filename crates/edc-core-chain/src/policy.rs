//! Read-only policy predicates.

use serde::{Deserialize, Serialize};

use edc_core_protocol::asset_flags::WHITE_LIST;

use crate::objects::{Account, Asset};

/// Which side of a transfer an account is acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Payer,
    Receiver,
}

/// Whitelist/blacklist resolution for one account against one asset.
///
/// Assets without the white-list flag are open to everyone. Otherwise an
/// account is rejected when any of the asset's blacklist authorities has
/// blacklisted it, or when the asset names whitelist authorities and none
/// of them has whitelisted the account. Blacklisting wins over
/// whitelisting.
pub fn is_authorized_asset(account: &Account, asset: &Asset) -> bool {
    if asset.options.flags & WHITE_LIST == 0 {
        return true;
    }

    for authority in &asset.options.blacklist_authorities {
        if account.blacklisting_accounts.contains(authority) {
            return false;
        }
    }

    if !asset.options.whitelist_authorities.is_empty() {
        return asset
            .options
            .whitelist_authorities
            .iter()
            .any(|authority| account.whitelisting_accounts.contains(authority));
    }

    true
}
