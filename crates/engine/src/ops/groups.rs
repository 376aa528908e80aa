use std::sync::PoisonError;

use crate::{
    Currency, EngineError, Group, GroupId, IdKind, Member, MemberId, ResultEngine,
    members::normalize_display_name,
};

use super::Engine;

/// Fresh invite codes tried before giving up on a collision.
const INVITE_CODE_ATTEMPTS: usize = 8;

impl Engine {
    /// Creates a group with its admin as first member.
    ///
    /// Returns the snapshot of the new group (the admin is `members[0]`).
    pub fn new_group(
        &self,
        name: &str,
        admin_name: &str,
        currency: Option<Currency>,
    ) -> ResultEngine<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidName(
                "group name must not be empty".to_string(),
            ));
        }
        let admin = Member::new(
            MemberId::new(self.ids.next_id(IdKind::Member)),
            normalize_display_name(admin_name)?,
        );
        let id = GroupId::new(self.ids.next_id(IdKind::Group));

        let mut groups = self.groups.write().unwrap_or_else(PoisonError::into_inner);
        if groups.contains_key(&id) {
            return Err(EngineError::ExistingKey(id.to_string()));
        }
        let invite_code = std::iter::repeat_with(|| self.ids.invite_code())
            .take(INVITE_CODE_ATTEMPTS)
            .find(|code| {
                !groups
                    .values()
                    .any(|group| group.invite_code.eq_ignore_ascii_case(code))
            })
            .ok_or_else(|| EngineError::ExistingKey("invite code".to_string()))?;

        let group = Group::new(
            id,
            name.to_string(),
            invite_code,
            currency.unwrap_or_default(),
            admin,
        );
        groups.insert(group.id.clone(), group.clone());
        Ok(group)
    }

    /// Adds a member to a group.
    ///
    /// Names are compared ignoring case and accents; a duplicate is rejected
    /// with [`EngineError::ExistingKey`].
    pub fn add_member(&self, group_id: &GroupId, name: &str) -> ResultEngine<Member> {
        let name = normalize_display_name(name)?;
        self.with_group_mut(group_id, |group| {
            group.check_member_name(&name)?;
            let member = Member::new(MemberId::new(self.ids.next_id(IdKind::Member)), name);
            group.members.push(member.clone());
            Ok(member)
        })
    }

    /// Snapshot of a group.
    pub fn group(&self, group_id: &GroupId) -> ResultEngine<Group> {
        self.with_group(group_id, |group| Ok(group.clone()))
    }

    /// Finds a group by its invite code (case-insensitive).
    pub fn group_by_invite_code(&self, code: &str) -> ResultEngine<Group> {
        let code = code.trim();
        let groups = self.groups.read().unwrap_or_else(PoisonError::into_inner);
        groups
            .values()
            .find(|group| group.invite_code.eq_ignore_ascii_case(code))
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound(format!("invite code {code}")))
    }

    /// Members of a group, in registration order.
    pub fn members(&self, group_id: &GroupId) -> ResultEngine<Vec<Member>> {
        self.with_group(group_id, |group| Ok(group.members.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    use crate::{Engine, EngineError, GroupId, IdGenerator, IdKind, SequentialIds};

    fn engine() -> Engine {
        Engine::builder().ids(SequentialIds::new()).build()
    }

    /// Sequential ids with invite codes handed out from a fixed list.
    struct ScriptedCodes {
        codes: Vec<&'static str>,
        next_code: AtomicUsize,
        counter: AtomicU64,
    }

    impl ScriptedCodes {
        fn new(codes: Vec<&'static str>) -> Self {
            Self {
                codes,
                next_code: AtomicUsize::new(0),
                counter: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for ScriptedCodes {
        fn next_id(&self, kind: IdKind) -> String {
            let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
            format!("{}-{n}", kind.as_str())
        }

        fn invite_code(&self) -> String {
            let i = self.next_code.fetch_add(1, Ordering::Relaxed);
            self.codes[i.min(self.codes.len() - 1)].to_string()
        }
    }

    #[test]
    fn new_group_registers_admin() {
        let engine = engine();
        let group = engine.new_group("Goa trip", "  Alice ", None).unwrap();
        assert_eq!(group.id.as_str(), "group-2");
        assert_eq!(group.invite_code, "INV001");
        assert_eq!(group.members.len(), 1);
        assert_eq!(group.members[0].name, "Alice");
        assert_eq!(group.members[0].id.as_str(), "member-1");
        assert_eq!(engine.group(&group.id).unwrap(), group);
    }

    #[test]
    fn duplicate_member_names_are_rejected() {
        let engine = engine();
        let group = engine.new_group("Flat", "Alice", None).unwrap();
        engine.add_member(&group.id, "Bob").unwrap();
        assert_eq!(
            engine.add_member(&group.id, "bob"),
            Err(EngineError::ExistingKey("bob".to_string()))
        );
        assert!(matches!(
            engine.add_member(&group.id, "ALICE"),
            Err(EngineError::ExistingKey(_))
        ));
        assert_eq!(engine.members(&group.id).unwrap().len(), 2);
    }

    #[test]
    fn blank_names_are_rejected() {
        let engine = engine();
        assert!(matches!(
            engine.new_group("  ", "Alice", None),
            Err(EngineError::InvalidName(_))
        ));
        assert!(matches!(
            engine.new_group("Flat", "", None),
            Err(EngineError::InvalidName(_))
        ));
        let group = engine.new_group("Flat", "Alice", None).unwrap();
        assert!(matches!(
            engine.add_member(&group.id, " \t "),
            Err(EngineError::InvalidName(_))
        ));
    }

    #[test]
    fn lookup_by_invite_code_ignores_case() {
        let engine = engine();
        let group = engine.new_group("Flat", "Alice", None).unwrap();
        assert_eq!(engine.group_by_invite_code("inv001").unwrap().id, group.id);
        assert!(matches!(
            engine.group_by_invite_code("NOPE00"),
            Err(EngineError::KeyNotFound(_))
        ));
    }

    #[test]
    fn colliding_invite_code_is_drawn_again() {
        let engine = Engine::builder()
            .ids(ScriptedCodes::new(vec!["ABC123", "abc123", "XYZ789"]))
            .build();
        let first = engine.new_group("Flat", "Alice", None).unwrap();
        let second = engine.new_group("Trip", "Bob", None).unwrap();
        assert_eq!(first.invite_code, "ABC123");
        assert_eq!(second.invite_code, "XYZ789");
        assert_eq!(engine.group_by_invite_code("xyz789").unwrap().id, second.id);
    }

    #[test]
    fn exhausted_invite_codes_are_rejected() {
        let engine = Engine::builder()
            .ids(ScriptedCodes::new(vec!["SAME00"]))
            .build();
        let first = engine.new_group("Flat", "Alice", None).unwrap();
        assert!(matches!(
            engine.new_group("Trip", "Bob", None),
            Err(EngineError::ExistingKey(_))
        ));
        assert_eq!(engine.group_by_invite_code("SAME00").unwrap().id, first.id);
    }

    #[test]
    fn rejected_member_does_not_consume_an_id() {
        let engine = engine();
        let group = engine.new_group("Flat", "Alice", None).unwrap();
        assert!(engine.add_member(&group.id, "alice").is_err());
        let bob = engine.add_member(&group.id, "Bob").unwrap();
        assert_eq!(bob.id.as_str(), "member-3");
    }

    #[test]
    fn unknown_group_is_not_found() {
        let engine = engine();
        assert!(matches!(
            engine.add_member(&GroupId::from("missing"), "Bob"),
            Err(EngineError::KeyNotFound(_))
        ));
    }
}
