//! Leaf trigger conditions.
//!
//! A [`Requirement`] compares two [`Field`]s (or stands alone as a modifier such
//! as `AddSource`). For diffing purposes requirements are opaque comparable
//! values; the rendering helpers exist for display only.

use serde::{Deserialize, Serialize};

use crate::format::NumberFormat;

/// Where a field reads its value from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A constant.
    #[default]
    Value,
    /// The current value at an address.
    Memory,
    /// The value at an address on the previous frame.
    Delta,
    /// The last different value at an address.
    Prior,
    /// A binary-coded-decimal read.
    Bcd,
}

/// The width of a memory read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSize {
    Bit(u8),
    LowNibble,
    HighNibble,
    #[default]
    EightBit,
    SixteenBit,
    TwentyFourBit,
    ThirtyTwoBit,
    BitCount,
}

impl FieldSize {
    fn function_name(self) -> String {
        match self {
            Self::Bit(n) => format!("bit{n}"),
            Self::LowNibble => "low4".into(),
            Self::HighNibble => "high4".into(),
            Self::EightBit => "byte".into(),
            Self::SixteenBit => "word".into(),
            Self::TwentyFourBit => "tbyte".into(),
            Self::ThirtyTwoBit => "dword".into(),
            Self::BitCount => "bitcount".into(),
        }
    }
}

/// One operand of a requirement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Field {
    pub field_type: FieldType,
    #[serde(default)]
    pub size: FieldSize,
    pub value: u32,
}

impl Field {
    /// A constant operand.
    pub fn value(value: u32) -> Self {
        Self {
            field_type: FieldType::Value,
            size: FieldSize::default(),
            value,
        }
    }

    /// A current-frame memory read.
    pub fn memory(size: FieldSize, address: u32) -> Self {
        Self {
            field_type: FieldType::Memory,
            size,
            value: address,
        }
    }

    /// A previous-frame memory read.
    pub fn delta(size: FieldSize, address: u32) -> Self {
        Self {
            field_type: FieldType::Delta,
            size,
            value: address,
        }
    }

    /// Returns the address if this field reads memory.
    pub fn address(&self) -> Option<u32> {
        match self.field_type {
            FieldType::Value => None,
            _ => Some(self.value),
        }
    }

    /// Render the field, e.g. `byte(0x001234)` or `prev(word(0x0040A0))`.
    pub fn render(&self, format: NumberFormat) -> String {
        let read = || format!("{}(0x{:06X})", self.size.function_name(), self.value);
        match self.field_type {
            FieldType::Value => format.format_value(self.value),
            FieldType::Memory => read(),
            FieldType::Delta => format!("prev({})", read()),
            FieldType::Prior => format!("prior({})", read()),
            FieldType::Bcd => format!("bcd({})", read()),
        }
    }
}

/// Comparison operator between the two operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl RequirementOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }
}

/// The role a requirement plays within its group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    #[default]
    None,
    ResetIf,
    PauseIf,
    AddSource,
    SubSource,
    AddHits,
    SubHits,
    AddAddress,
    AndNext,
    OrNext,
    ResetNextIf,
    Measured,
    MeasuredIf,
    Trigger,
}

impl RequirementType {
    fn prefix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::ResetIf => "ResetIf ",
            Self::PauseIf => "PauseIf ",
            Self::AddSource => "AddSource ",
            Self::SubSource => "SubSource ",
            Self::AddHits => "AddHits ",
            Self::SubHits => "SubHits ",
            Self::AddAddress => "AddAddress ",
            Self::AndNext => "AndNext ",
            Self::OrNext => "OrNext ",
            Self::ResetNextIf => "ResetNextIf ",
            Self::Measured => "Measured ",
            Self::MeasuredIf => "MeasuredIf ",
            Self::Trigger => "Trigger ",
        }
    }
}

/// A single leaf condition.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub requirement_type: RequirementType,
    pub left: Field,
    #[serde(default)]
    pub operator: Option<RequirementOperator>,
    #[serde(default)]
    pub right: Option<Field>,
    #[serde(default)]
    pub hit_target: u32,
}

impl Requirement {
    /// `left <op> right` with no flag and no hit target.
    pub fn compare(left: Field, operator: RequirementOperator, right: Field) -> Self {
        Self {
            requirement_type: RequirementType::None,
            left,
            operator: Some(operator),
            right: Some(right),
            hit_target: 0,
        }
    }

    /// A modifier with no comparison, e.g. `AddSource byte(0x1234)`.
    pub fn modifier(requirement_type: RequirementType, left: Field) -> Self {
        Self {
            requirement_type,
            left,
            ..Default::default()
        }
    }

    pub fn with_type(mut self, requirement_type: RequirementType) -> Self {
        self.requirement_type = requirement_type;
        self
    }

    pub fn with_hit_target(mut self, hit_target: u32) -> Self {
        self.hit_target = hit_target;
        self
    }

    /// Addresses read by this requirement, left operand first.
    pub fn addresses(&self) -> impl Iterator<Item = u32> + '_ {
        self.left
            .address()
            .into_iter()
            .chain(self.right.and_then(|r| r.address()))
    }

    /// Human-readable form, e.g. `ResetIf byte(0x001234) == 5 (3)`.
    pub fn render(&self, format: NumberFormat) -> String {
        let mut text = String::from(self.requirement_type.prefix());
        text.push_str(&self.left.render(format));
        if let (Some(op), Some(right)) = (self.operator, self.right) {
            text.push(' ');
            text.push_str(op.symbol());
            text.push(' ');
            text.push_str(&right.render(format));
        }
        if self.hit_target > 0 {
            text.push_str(&format!(" ({})", self.hit_target));
        }
        text
    }
}
