use core::fmt;
use core::str::FromStr;

use serde::Deserialize;

use crate::error::BridgeError;

/// Terminal status of a VM execution, as carried in the result buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusCode {
    Success = 0,
    Failure = 1,
    Revert = 2,
    OutOfGas = 3,
    InvalidInstruction = 4,
    UndefinedInstruction = 5,
    StackOverflow = 6,
    StackUnderflow = 7,
    BadJumpDestination = 8,
    InvalidMemoryAccess = 9,
    CallDepthExceeded = 10,
    StaticModeViolation = 11,
    PrecompileFailure = 12,
    ContractValidationFailure = 13,
    ArgumentOutOfRange = 14,
    WasmUnreachableInstruction = 15,
    WasmTrap = 16,
    InternalError = -1,
    Rejected = -2,
    OutOfMemory = -3,
}

impl StatusCode {
    pub const ALL: [StatusCode; 20] = [
        StatusCode::Success,
        StatusCode::Failure,
        StatusCode::Revert,
        StatusCode::OutOfGas,
        StatusCode::InvalidInstruction,
        StatusCode::UndefinedInstruction,
        StatusCode::StackOverflow,
        StatusCode::StackUnderflow,
        StatusCode::BadJumpDestination,
        StatusCode::InvalidMemoryAccess,
        StatusCode::CallDepthExceeded,
        StatusCode::StaticModeViolation,
        StatusCode::PrecompileFailure,
        StatusCode::ContractValidationFailure,
        StatusCode::ArgumentOutOfRange,
        StatusCode::WasmUnreachableInstruction,
        StatusCode::WasmTrap,
        StatusCode::InternalError,
        StatusCode::Rejected,
        StatusCode::OutOfMemory,
    ];

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == StatusCode::Success
    }
}

impl TryFrom<i32> for StatusCode {
    type Error = BridgeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        StatusCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_i32() == value)
            .ok_or(BridgeError::UnknownStatusCode(value))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.as_i32())
    }
}

/// Kind of call a message describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CallKind {
    Call = 0,
    DelegateCall = 1,
    CallCode = 2,
    Create = 3,
    Create2 = 4,
}

impl CallKind {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_create(self) -> bool {
        matches!(self, CallKind::Create | CallKind::Create2)
    }
}

impl TryFrom<i32> for CallKind {
    type Error = BridgeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CallKind::Call),
            1 => Ok(CallKind::DelegateCall),
            2 => Ok(CallKind::CallCode),
            3 => Ok(CallKind::Create),
            4 => Ok(CallKind::Create2),
            other => Err(BridgeError::UnknownCallKind(other)),
        }
    }
}

/// Message flags bitset.
pub type CallFlags = u32;
/// The call may not modify state.
pub const CALL_FLAG_STATIC: CallFlags = 1 << 0;

/// Hard-fork revision the VM is asked to execute under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum Revision {
    Frontier = 0,
    Homestead = 1,
    TangerineWhistle = 2,
    SpuriousDragon = 3,
    Byzantium = 4,
    Constantinople = 5,
    Petersburg = 6,
    Istanbul = 7,
    Berlin = 8,
}

impl Revision {
    pub const LATEST: Revision = Revision::Berlin;

    pub const ALL: [Revision; 9] = [
        Revision::Frontier,
        Revision::Homestead,
        Revision::TangerineWhistle,
        Revision::SpuriousDragon,
        Revision::Byzantium,
        Revision::Constantinople,
        Revision::Petersburg,
        Revision::Istanbul,
        Revision::Berlin,
    ];

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl Default for Revision {
    fn default() -> Self {
        Revision::Byzantium
    }
}

impl TryFrom<i32> for Revision {
    type Error = BridgeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Revision::ALL
            .iter()
            .copied()
            .find(|rev| rev.as_i32() == value)
            .ok_or(BridgeError::UnknownRevision(value))
    }
}

impl FromStr for Revision {
    type Err = BridgeError;

    /// Accepts a name (`"byzantium"`, `"tangerine_whistle"`, any case) or the numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(number) = s.parse::<i32>() {
            return Revision::try_from(number);
        }
        let name: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Revision::ALL
            .iter()
            .copied()
            .find(|rev| format!("{:?}", rev).to_ascii_lowercase() == name)
            .ok_or_else(|| BridgeError::Config(format!("unknown revision name '{}'", s)))
    }
}

/// Effect of a storage write, as reported back to the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StorageStatus {
    /// 0 -> 0 and X -> X.
    Unchanged = 0,
    /// X -> Y.
    Modified = 1,
    /// X -> Y -> Z.
    ModifiedAgain = 2,
    /// 0 -> X.
    Added = 3,
    /// X -> 0.
    Deleted = 4,
}

impl StorageStatus {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// EIP-2929 access status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum AccessStatus {
    Cold = 0,
    Warm = 1,
}
