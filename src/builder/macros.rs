//! Macros for declaring state and event enums.

/// Generate a state enum with its `State` implementation.
///
/// Every variant is given its display name. An associated `ALL` slice lists
/// the variants in declaration order, for use as the declared state set.
///
/// # Example
///
/// ```
/// use nodewatch::core::State;
/// use nodewatch::state_enum;
///
/// state_enum! {
///     pub enum PumpState {
///         Idle => "IDLE",
///         Running => "RUNNING",
///         Broken => "BROKEN",
///     }
///     error: [Broken]
/// }
///
/// assert_eq!(PumpState::Running.name(), "RUNNING");
/// assert_eq!(PumpState::ALL.len(), 3);
/// assert!(PumpState::Broken.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $label),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

/// Generate an event enum with its `Event` implementation.
///
/// # Example
///
/// ```
/// use nodewatch::core::Event;
/// use nodewatch::event_enum;
///
/// event_enum! {
///     pub enum PumpEvent {
///         Start => "START",
///         Stall => "STALL",
///     }
/// }
///
/// assert_eq!(PumpEvent::Stall.name(), "STALL");
/// assert_eq!(PumpEvent::ALL, &[PumpEvent::Start, PumpEvent::Stall]);
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }
    ) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $label),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::core::Event::name(self))
            }
        }
    };
}
