use alloy_primitives::FixedBytes;

/// `bytes4(keccak256("isValidSignature(bytes32,bytes)"))`, returned by a recovery module that
/// accepts a signature.
pub const ERC1271_MAGIC_VALUE: FixedBytes<4> = FixedBytes([0x16, 0x26, 0xba, 0x7e]);

/// Which optional collaborator a `ModuleChanged` event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ModuleKind {
    Policy = 0,
    Recovery = 1,
}

impl From<ModuleKind> for u8 {
    fn from(kind: ModuleKind) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for ModuleKind {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ModuleKind::Policy),
            1 => Ok(ModuleKind::Recovery),
            _ => Err(()),
        }
    }
}
