// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Generates a closed set of text-backed choices.
///
/// Each variant is bound to the exact text stored in the database and shown
/// in the dashboard. The macro emits:
/// - the enum itself, serialized as that text
/// - `ALL`, every variant in display order
/// - `as_str`, `Display`, and a `FromStr` that rejects unknown text with the
///   given `DomainError` variant
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident => $err:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $text:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the stored text for this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(DomainError::$err(s.to_string())),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

choice_enum! {
    /// Employment arrangement of a team member.
    ContractType => InvalidContractType {
        Employee => "Employee",
        Contractor => "Contractor",
    }
}

choice_enum! {
    /// Installation kind present at a site.
    ///
    /// A site may carry both kinds; PV fields are meaningful only when
    /// `Pv` is selected, BESS fields only when `Bess` is selected.
    SiteKind => InvalidSiteKind {
        /// Photovoltaic generation.
        Pv => "PV",
        /// Battery energy storage.
        Bess => "BESS",
    }
}

choice_enum! {
    /// Region a site is located in.
    Region => InvalidRegion {
        Hokkaido => "Hokkaido",
        Tohoku => "Tohoku",
        Kanto => "Kanto",
        Chubu => "Chubu",
        Kinki => "Kinki",
        Chugoku => "Chugoku",
        Shikoku => "Shikoku",
        Kyushu => "Kyushu",
    }
}

choice_enum! {
    /// Grid connection voltage class.
    GridVoltage => InvalidGridVoltage {
        /// High voltage.
        Hv => "HV",
        /// Extra high voltage.
        Ehv => "EHV",
    }
}

choice_enum! {
    /// Operating entity responsible for a site.
    SiteOperator => InvalidSiteOperator {
        Sro => "SRO",
        Srs => "SRS",
    }
}

choice_enum! {
    /// Maintenance ticket category.
    TicketCategory => InvalidTicketCategory {
        Electrical => "Electrical",
        RepairWork => "Repair work",
        MonthlyInspection => "Monthly inspection",
        AnnualInspection => "Annual inspection",
        ExtraordinaryInspection => "Extraordinary inspection",
        InverterMaintenance => "Inverter maintenance",
        Curtailment => "Curtailment",
        ShutdownByGridOperator => "Shutdown by grid operator",
        Scada => "SCADA",
        WeatherSensors => "Weather Sensors",
        TelecomAutomation => "Telecom / Automation",
        Vegetation => "Vegetation",
        Mechanical => "Mechanical",
        Civil => "Civil",
        NaturalDisaster => "Natural disaster",
        Snow => "Snow",
        Theft => "Theft",
        SecuritySystem => "Security System",
        Others => "Others",
    }
}

choice_enum! {
    /// Work status of a ticket.
    TicketStatus => InvalidTicketStatus {
        Pending => "Pending",
        Ongoing => "Ongoing",
        Closed => "Closed",
    }
}

choice_enum! {
    /// Billing progress of a sales ticket.
    InvoiceStatus => InvalidInvoiceStatus {
        Pending => "pending",
        PartiallyInvoiced => "partially invoiced",
        FullyInvoiced => "fully invoiced",
        FullyPaid => "fully paid",
    }
}

choice_enum! {
    /// Color scheme preference of an operator.
    #[derive(Default)]
    Theme => InvalidTheme {
        #[default]
        Light => "light",
        Dark => "dark",
    }
}

impl Theme {
    /// Returns the opposite scheme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
