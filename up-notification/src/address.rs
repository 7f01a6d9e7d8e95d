/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Endpoint address rules for notifications.
//!
//! A [`UUri`] names one resource of one uEntity on one authority. The same value
//! is used as a concrete address (the source or sink of a notification) and as a
//! filter handed to [`up_rust::UTransport::register_listener`], where some field
//! values act as wildcards:
//!
//! | field              | wildcard value(s)                   |
//! |--------------------|-------------------------------------|
//! | `authority_name`   | `"*"`                               |
//! | `ue_id`            | `0xFFFF` in either 16-bit half      |
//! | `ue_version_major` | `0xFF`                              |
//! | `resource_id`      | `0xFFFF`, or `0` ("any resource")   |
//!
//! ```
//! use up_notification::EndpointAddress;
//! use up_rust::UUri;
//!
//! let source = UUri {
//!     authority_name: "test0".to_string(),
//!     ue_id: 0x10001,
//!     ue_version_major: 1,
//!     resource_id: 0x8000,
//!     ..Default::default()
//! };
//! let filter = source.with_resource(0);
//!
//! assert!(source.matches_filter(&filter));
//! assert!(source.matches_filter(&source));
//! assert!(!source.matches_filter(&source.with_resource(0x8001)));
//! ```

use up_rust::UUri;

pub const WILDCARD_AUTHORITY: &str = "*";
pub const WILDCARD_ENTITY_TYPE: u32 = 0x0000_FFFF;
pub const WILDCARD_ENTITY_INSTANCE: u32 = 0xFFFF_0000;
pub const WILDCARD_ENTITY_VERSION: u32 = 0xFF;
pub const WILDCARD_RESOURCE_ID: u32 = 0xFFFF;
/// Resource id of an entity itself. As a filter it accepts every resource of the entity.
pub const ANY_RESOURCE_ID: u32 = 0;

/// Notification addressing rules on top of [`UUri`].
pub trait EndpointAddress {
    /// Checks this address against `filter`, skipping every field the filter wildcards.
    ///
    /// Without wildcards in `filter` this is plain equality of the four fields.
    fn matches_filter(&self, filter: &UUri) -> bool;

    fn contains_wildcard(&self) -> bool;

    /// Whether this address can appear as the origin of a notification.
    fn is_concrete_source(&self) -> bool;

    /// `true` for the default-constructed address.
    fn is_unset(&self) -> bool;

    /// Copy of this address pointing at another resource of the same entity.
    fn with_resource(&self, resource_id: u16) -> UUri;
}

impl EndpointAddress for UUri {
    fn matches_filter(&self, filter: &UUri) -> bool {
        authority_matches(&self.authority_name, &filter.authority_name)
            && entity_matches(self.ue_id, filter.ue_id)
            && (filter.ue_version_major == WILDCARD_ENTITY_VERSION
                || filter.ue_version_major == self.ue_version_major)
            && (filter.resource_id == WILDCARD_RESOURCE_ID
                || filter.resource_id == ANY_RESOURCE_ID
                || filter.resource_id == self.resource_id)
    }

    fn contains_wildcard(&self) -> bool {
        self.authority_name == WILDCARD_AUTHORITY
            || self.ue_id & WILDCARD_ENTITY_TYPE == WILDCARD_ENTITY_TYPE
            || self.ue_id & WILDCARD_ENTITY_INSTANCE == WILDCARD_ENTITY_INSTANCE
            || self.ue_version_major == WILDCARD_ENTITY_VERSION
            || self.resource_id == WILDCARD_RESOURCE_ID
    }

    fn is_concrete_source(&self) -> bool {
        !self.authority_name.is_empty() && !self.contains_wildcard()
    }

    fn is_unset(&self) -> bool {
        self == &UUri::default()
    }

    fn with_resource(&self, resource_id: u16) -> UUri {
        UUri {
            resource_id: u32::from(resource_id),
            ..self.clone()
        }
    }
}

fn authority_matches(candidate: &str, filter: &str) -> bool {
    filter == WILDCARD_AUTHORITY || filter == candidate
}

fn entity_matches(candidate: u32, filter: u32) -> bool {
    let type_matches = filter & WILDCARD_ENTITY_TYPE == WILDCARD_ENTITY_TYPE
        || filter & WILDCARD_ENTITY_TYPE == candidate & WILDCARD_ENTITY_TYPE;
    let instance_matches = filter & WILDCARD_ENTITY_INSTANCE == WILDCARD_ENTITY_INSTANCE
        || filter & WILDCARD_ENTITY_INSTANCE == candidate & WILDCARD_ENTITY_INSTANCE;
    type_matches && instance_matches
}
