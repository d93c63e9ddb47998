//! User roles.

define_text_enum! {
    /// Role carried on every user row and in every access token.
    Role {
        /// Default for self-service signup.
        Attendee = "attendee",
        Organizer = "organizer",
        Admin = "admin",
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Attendee
    }
}

impl Role {
    /// Whether this role may create and manage events.
    pub fn can_organize(self) -> bool {
        matches!(self, Role::Organizer | Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("attendee".parse::<Role>().unwrap(), Role::Attendee);
        assert_eq!("organizer".parse::<Role>().unwrap(), Role::Organizer);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn rejects_unknown_and_wrong_case() {
        assert!("Organizer".parse::<Role>().is_err());
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn default_is_attendee() {
        assert_eq!(Role::default(), Role::Attendee);
    }

    #[test]
    fn serializes_verbatim() {
        let json = serde_json::to_string(&Role::Organizer).unwrap();
        assert_eq!(json, "\"organizer\"");
    }

    #[test]
    fn only_organizers_and_admins_organize() {
        assert!(!Role::Attendee.can_organize());
        assert!(Role::Organizer.can_organize());
        assert!(Role::Admin.can_organize());
    }
}
