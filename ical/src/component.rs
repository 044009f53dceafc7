// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component tree and the typed views over it.

use std::ops::Deref;

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::keyword::{KW_PRODID, KW_VCALENDAR, KW_VERSION, KW_VEVENT};
use crate::property::Property;

/// Product identifier written into freshly created calendars.
pub const PRODUCT_ID: &str = concat!("-//calport//calport ", env!("CARGO_PKG_VERSION"), "//EN");

/// A nested `BEGIN:X` … `END:X` block.
///
/// Holds at most one property per name: inserting a property whose name is
/// already present replaces the old one, which keeps its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    name: String,
    properties: IndexMap<String, Property>,
    children: Vec<Component>,
}

impl Component {
    /// Creates an empty component.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Block type, e.g. `VCALENDAR` or `VEVENT`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Properties in insertion order
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &Property> {
        self.properties.values()
    }

    /// Looks up a property by exact name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Child components in document order
    #[must_use]
    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Adds a property without parameters, replacing one of the same name.
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert_property(Property::new(name, value));
    }

    /// Inserts a property, returning the one it replaced.
    pub fn insert_property(&mut self, property: Property) -> Option<Property> {
        self.properties.insert(property.name().to_owned(), property)
    }

    /// Appends a child component.
    pub fn add_component(&mut self, component: Component) {
        self.children.push(component);
    }
}

/// A `VCALENDAR` component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar(Component);

impl Calendar {
    /// Creates an empty calendar carrying `PRODID` and `VERSION`.
    #[must_use]
    pub fn new() -> Self {
        let mut component = Component::new(KW_VCALENDAR);
        component.add_property(KW_PRODID, PRODUCT_ID);
        component.add_property(KW_VERSION, "2.0");
        Self(component)
    }

    /// `VEVENT` children in document order
    pub fn events(&self) -> impl Iterator<Item = Event<'_>> {
        self.0
            .children
            .iter()
            .filter_map(|child| Event::try_from(child).ok())
    }

    /// Appends a `VEVENT` component.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidComponent`] if `event` is not a `VEVENT`.
    pub fn add_event(&mut self, event: Component) -> Result<(), ParseError> {
        if event.name != KW_VEVENT {
            return Err(ParseError::InvalidComponent {
                expected: KW_VEVENT,
                found: event.name,
            });
        }
        self.0.add_component(event);
        Ok(())
    }

    /// Adds a calendar property, replacing one of the same name.
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.add_property(name, value);
    }

    /// Consumes the view, returning the underlying component.
    #[must_use]
    pub fn into_component(self) -> Component {
        self.0
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Calendar {
    type Target = Component;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Component> for Calendar {
    type Error = ParseError;

    fn try_from(component: Component) -> Result<Self, Self::Error> {
        if component.name == KW_VCALENDAR {
            Ok(Self(component))
        } else {
            Err(ParseError::InvalidComponent {
                expected: KW_VCALENDAR,
                found: component.name,
            })
        }
    }
}

/// A read-only view over a `VEVENT` component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'a>(&'a Component);

impl<'a> Event<'a> {
    /// Creates an empty `VEVENT` component, ready to be filled and added to a calendar.
    #[must_use]
    pub fn new_component() -> Component {
        Component::new(KW_VEVENT)
    }

    /// The underlying component
    #[must_use]
    pub fn component(self) -> &'a Component {
        self.0
    }
}

impl Deref for Event<'_> {
    type Target = Component;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<'a> TryFrom<&'a Component> for Event<'a> {
    type Error = ParseError;

    fn try_from(component: &'a Component) -> Result<Self, Self::Error> {
        if component.name == KW_VEVENT {
            Ok(Self(component))
        } else {
            Err(ParseError::InvalidComponent {
                expected: KW_VEVENT,
                found: component.name.clone(),
            })
        }
    }
}
