//! # Session Flows
//!
//! End-to-end runs of the sync protocol over the loopback transport: every
//! request and reply crosses the codec exactly as it would on a network.

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use gs_01_permissions::{PERM_PLAYER_READ, PERM_ROLES_UPDATE};
    use gs_02_players::{LiveEntity, ManualClock, PlayerInstance, SessionConfig, Vitals};
    use gs_03_sync::{encode, ClientMessage, Loopback, PermissionsListener};
    use parking_lot::Mutex;
    use shared_types::PlayerIdentity;

    use crate::integration::ScriptedEntity;

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn session() -> (Loopback, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let lb = Loopback::new(
            SessionConfig::for_testing(Path::new("/unused")),
            clock.clone(),
        );
        (lb, clock)
    }

    fn identity(guid: &str) -> PlayerIdentity {
        PlayerIdentity::new(guid, format!("7656-{guid}"), guid.to_uppercase())
    }

    fn join(lb: &mut Loopback, guid: &str) {
        lb.join(identity(guid), None);
    }

    fn grant(lb: &mut Loopback, guid: &str, permission: &str) {
        lb.server_mut()
            .load_player_permissions(guid, &[permission.to_string()])
            .unwrap();
        lb.pump();
    }

    fn healthy(health: f32) -> Vitals {
        Vitals {
            health,
            ..Vitals::default()
        }
    }

    #[derive(Default)]
    struct CountingListener {
        seen: Mutex<Vec<Option<String>>>,
    }

    impl PermissionsListener for CountingListener {
        fn on_permissions_updated(&self, own: Option<&PlayerInstance>) {
            self.seen.lock().push(own.map(|p| p.guid().to_string()));
        }
    }

    // =========================================================================
    // CONNECT AND REFRESH
    // =========================================================================

    #[test]
    fn test_joining_client_mirrors_itself_and_the_roles() {
        let (mut lb, _) = session();
        lb.server().roles().load_role("mod", vec!["Teleport ALLOW".into()]);
        join(&mut lb, "a");

        let a = lb.client("a").unwrap();
        assert_eq!(a.own_guid(), Some("a"));
        assert_eq!(a.own_instance().unwrap().name(), "A");
        assert_eq!(a.roles().role_names(), vec!["everyone", "mod"]);
    }

    #[test]
    fn test_refresh_replies_to_the_requester_only() {
        let (mut lb, _) = session();
        join(&mut lb, "a");
        join(&mut lb, "b");
        join(&mut lb, "c");

        assert_eq!(lb.client("c").unwrap().players().len(), 3);
        assert_eq!(lb.client("b").unwrap().players().guids(), vec!["a", "b"]);
        assert_eq!(lb.client("a").unwrap().players().guids(), vec!["a"]);

        lb.client("a").unwrap().request_refresh().unwrap();
        lb.pump();
        assert_eq!(lb.client("a").unwrap().players().len(), 3);
        assert_eq!(lb.client("b").unwrap().players().len(), 2);
    }

    #[test]
    fn test_refresh_carries_sampled_vitals() {
        let (mut lb, _) = session();
        let entity = ScriptedEntity::new(healthy(87.5));
        lb.join(identity("a"), Some(entity as Arc<dyn LiveEntity>));
        join(&mut lb, "b");

        let mirrored = lb.client("b").unwrap().player("a").unwrap();
        assert_eq!(mirrored.vitals().health, 87.5);
        assert!(!mirrored.can_send_data());
    }

    #[test]
    fn test_server_tick_honors_refresh_interval() {
        let (mut lb, clock) = session();
        let entity = ScriptedEntity::new(healthy(100.0));
        lb.join(identity("a"), Some(entity.clone() as Arc<dyn LiveEntity>));
        join(&mut lb, "b");

        entity.set(healthy(40.0));
        clock.advance(99);
        assert_eq!(lb.server_mut().tick(), 0);
        assert_eq!(lb.server().player("a").unwrap().vitals().health, 100.0);

        clock.advance(1);
        // "b" has no entity and never refreshes.
        assert_eq!(lb.server_mut().tick(), 1);
        assert_eq!(lb.server().player("a").unwrap().vitals().health, 40.0);
    }

    // =========================================================================
    // ACCESS CONTROL
    // =========================================================================

    #[test]
    fn test_update_player_requires_read_permission() {
        let (mut lb, clock) = session();
        let entity = ScriptedEntity::new(healthy(100.0));
        lb.join(identity("a"), Some(entity.clone() as Arc<dyn LiveEntity>));
        join(&mut lb, "b");

        entity.set(healthy(25.0));
        clock.advance(100);

        lb.client("b").unwrap().request_player("a").unwrap();
        assert_eq!(lb.pump(), 1, "denied request must get no reply");
        let stale = lb.client("b").unwrap().player("a").unwrap();
        assert_eq!(stale.vitals().health, 100.0);

        grant(&mut lb, "b", PERM_PLAYER_READ);
        assert!(lb.client("b").unwrap().has_permission(PERM_PLAYER_READ));

        lb.client("b").unwrap().request_player("a").unwrap();
        assert_eq!(lb.pump(), 2);
        let fresh = lb.client("b").unwrap().player("a").unwrap();
        assert_eq!(fresh.vitals().health, 25.0);

        // The reply went to "b" alone.
        assert!(lb.client("a").unwrap().player("a").unwrap().vitals().health > 99.0);
    }

    #[test]
    fn test_explicit_denial_beats_role_grant() {
        let (mut lb, _) = session();
        lb.server().roles().load_role("admin", vec!["Admin ALLOW".into()]);
        join(&mut lb, "a");
        join(&mut lb, "b");

        lb.server_mut()
            .load_player_roles("b", &["admin".to_string()])
            .unwrap();
        assert!(lb.server().has_permission("b", PERM_PLAYER_READ));

        lb.server_mut()
            .load_player_permissions("b", &["Admin.Player DISALLOW".to_string()])
            .unwrap();
        lb.pump();
        assert!(!lb.server().has_permission("b", PERM_PLAYER_READ));
        assert!(lb.server().has_permission("b", PERM_ROLES_UPDATE));
        assert!(!lb.client("b").unwrap().has_permission(PERM_PLAYER_READ));
    }

    #[test]
    fn test_frame_of_another_version_is_ignored() {
        let (mut lb, _) = session();
        join(&mut lb, "a");

        let frame = encode(&ClientMessage::RefreshPlayers, 2).unwrap();
        lb.server_mut().handle_frame("a", &frame);
        lb.server_mut().handle_frame("a", b"\x01");
        assert_eq!(lb.pump(), 0);
    }

    #[test]
    fn test_requests_from_unknown_sender_are_denied() {
        let (mut lb, _) = session();
        join(&mut lb, "a");

        lb.server_mut().handle_message(
            "ghost",
            ClientMessage::UpdateRole {
                name: "mod".into(),
                permissions: vec!["Everything ALLOW".into()],
            },
        );
        assert!(lb.server().roles().role_entries("mod").is_none());
        assert_eq!(lb.pump(), 0);
    }

    #[test]
    fn test_denials_show_up_in_metrics() {
        let (mut lb, _) = session();
        join(&mut lb, "a");
        join(&mut lb, "b");
        gs_diagnostics::register_metrics().unwrap();

        lb.client("b").unwrap().request_player("a").unwrap();
        lb.pump();

        let text = gs_diagnostics::encode_metrics().unwrap();
        assert!(text.contains("gs_sync_requests_denied_total{message=\"UpdatePlayer\"}"));
        assert!(text.contains("gs_sync_messages_received_total"));
    }

    // =========================================================================
    // ROLES
    // =========================================================================

    #[test]
    fn test_role_update_reaches_every_client() {
        let (mut lb, _) = session();
        join(&mut lb, "a");
        join(&mut lb, "b");
        grant(&mut lb, "a", PERM_ROLES_UPDATE);

        lb.client("a")
            .unwrap()
            .push_role("mod", vec!["Teleport ALLOW".into()])
            .unwrap();
        lb.pump();

        for guid in ["a", "b"] {
            assert_eq!(
                lb.client(guid).unwrap().roles().role_entries("mod"),
                Some(vec!["Teleport ALLOW".to_string()])
            );
        }

        lb.server_mut()
            .load_player_roles("b", &["mod".to_string()])
            .unwrap();
        lb.pump();
        assert!(lb.server().has_permission("b", "Teleport"));
        assert!(lb.client("b").unwrap().has_permission("Teleport"));
    }

    #[test]
    fn test_role_edit_applies_to_members_immediately() {
        let (mut lb, _) = session();
        lb.server().roles().load_role("mod", vec!["Teleport ALLOW".into()]);
        join(&mut lb, "a");
        join(&mut lb, "b");
        lb.server_mut()
            .load_player_roles("b", &["mod".to_string()])
            .unwrap();
        grant(&mut lb, "a", PERM_ROLES_UPDATE);
        assert!(lb.server().has_permission("b", "Teleport"));

        lb.client("a")
            .unwrap()
            .push_role("mod", vec!["Spawn ALLOW".into()])
            .unwrap();
        lb.pump();

        assert!(!lb.server().has_permission("b", "Teleport"));
        assert!(lb.server().has_permission("b", "Spawn"));
        assert!(lb.client("b").unwrap().has_permission("Spawn"));
    }

    #[test]
    fn test_role_push_without_permission_is_dropped() {
        let (mut lb, _) = session();
        join(&mut lb, "a");
        join(&mut lb, "b");

        lb.client("a")
            .unwrap()
            .push_role("mod", vec!["Teleport ALLOW".into()])
            .unwrap();
        lb.pump();

        assert!(lb.server().roles().role_entries("mod").is_none());
        assert!(lb.client("b").unwrap().roles().role_entries("mod").is_none());
    }

    #[test]
    fn test_role_created_after_join_survives_on_own_mirror() {
        let (mut lb, _) = session();
        join(&mut lb, "a");

        lb.server().load_role("medic", vec!["Heal ALLOW".into()]);
        lb.server_mut()
            .load_player_roles("a", &["medic".to_string()])
            .unwrap();
        lb.pump();

        let a = lb.client("a").unwrap();
        assert_eq!(a.roles().role_names(), vec!["everyone", "medic"]);
        assert!(a
            .own_instance()
            .unwrap()
            .roles()
            .contains(&"medic".to_string()));
        assert!(a.has_permission("Heal"));
    }

    #[test]
    fn test_listeners_hear_role_and_instance_changes() {
        let (mut lb, _) = session();
        join(&mut lb, "a");
        join(&mut lb, "b");
        grant(&mut lb, "a", PERM_ROLES_UPDATE);

        let listener = Arc::new(CountingListener::default());
        lb.client_mut("b").unwrap().add_listener(listener.clone());

        lb.client("a")
            .unwrap()
            .push_role("mod", Vec::new())
            .unwrap();
        lb.pump();
        grant(&mut lb, "b", "Spawn");

        assert_eq!(
            *listener.seen.lock(),
            vec![Some("b".to_string()), Some("b".to_string())]
        );
    }

    // =========================================================================
    // DISCONNECT
    // =========================================================================

    #[test]
    fn test_leave_is_broadcast() {
        let (mut lb, _) = session();
        join(&mut lb, "a");
        join(&mut lb, "b");
        join(&mut lb, "c");

        lb.leave("b");
        assert!(lb.server().player("b").is_none());
        assert!(lb.client("c").unwrap().player("b").is_none());
        assert_eq!(lb.client("c").unwrap().players().guids(), vec!["a", "c"]);
        assert!(!lb.server_mut().disconnect("b"));
    }

    #[test]
    fn test_reconnect_replaces_instance() {
        let (mut lb, _) = session();
        join(&mut lb, "a");
        grant(&mut lb, "a", "Spawn");

        // Without a store nothing survives the reconnect.
        lb.leave("a");
        join(&mut lb, "a");
        assert!(!lb.server().has_permission("a", "Spawn"));
        assert_eq!(lb.server().players().len(), 1);
    }
}
