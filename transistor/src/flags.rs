// transistor/src/flags.rs

use crate::flag::FlagRef;

/// Trait for enums whose members are flags.
///
/// Derive this on fieldless enums. Without declared values, members resolve
/// by position (first member is bit 0):
///
/// ```
/// use transistor::Flags;
///
/// #[derive(Flags, Clone, Copy, Debug, PartialEq, Eq)]
/// pub enum Permission {
///     Read,
///     Write,
///     Delete,
///     Admin,
/// }
///
/// assert_eq!(Permission::Delete.bits(), 4);
/// assert_eq!(Permission::all_bits(), 15);
/// assert_eq!(Permission::Admin.name(), "Admin");
/// ```
///
/// With declared values on an unsigned `repr`, members resolve to those values:
///
/// ```
/// use transistor::Flags;
///
/// #[derive(Flags, Clone, Copy, Debug, PartialEq, Eq)]
/// #[repr(u8)]
/// pub enum Mode {
///     Exec = 1,
///     Write = 2,
///     ReadWrite = 6,
/// }
///
/// assert_eq!(Mode::ReadWrite.bits(), 6);
/// ```
pub trait Flags: Copy + Into<FlagRef> + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Member name as declared.
    fn name(self) -> &'static str;

    /// Flag reference for this member.
    fn flag_ref(self) -> FlagRef;

    /// Resolved bit value.
    #[inline]
    fn bits(self) -> u64 {
        self.flag_ref().resolve()
    }

    /// Combined value of every member.
    fn all_bits() -> u64 {
        Self::ALL.iter().fold(0, |acc, flag| acc | flag.bits())
    }

    /// Member with the given name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|flag| flag.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Channel {
        Email,
        Sms,
        Push,
    }

    impl Flags for Channel {
        const ALL: &'static [Self] = &[Channel::Email, Channel::Sms, Channel::Push];

        fn name(self) -> &'static str {
            match self {
                Channel::Email => "Email",
                Channel::Sms => "Sms",
                Channel::Push => "Push",
            }
        }

        fn flag_ref(self) -> FlagRef {
            FlagRef::positional(self as u32)
        }
    }

    impl From<Channel> for FlagRef {
        fn from(flag: Channel) -> Self {
            flag.flag_ref()
        }
    }

    #[test]
    fn bits_follow_declaration_order() {
        assert_eq!(Channel::Email.bits(), 1);
        assert_eq!(Channel::Sms.bits(), 2);
        assert_eq!(Channel::Push.bits(), 4);
    }

    #[test]
    fn all_bits_combines_members() {
        assert_eq!(Channel::all_bits(), 7);
    }

    #[test]
    fn from_name_is_exact() {
        assert_eq!(Channel::from_name("Sms"), Some(Channel::Sms));
        assert_eq!(Channel::from_name("sms"), None);
        assert_eq!(Channel::from_name("Fax"), None);
    }
}
