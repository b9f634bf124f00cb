//! # Persistence Flows
//!
//! Sessions backed by the file store: records written on connect and
//! disconnect, legacy permission files migrated, state restored after a
//! server restart.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use gs_02_players::{
        permission_record_name, permission_sources, FilePlayerStore, ManualClock, PermissionSource,
        SessionConfig,
    };
    use gs_03_sync::Loopback;
    use shared_types::PlayerIdentity;
    use tempfile::TempDir;

    fn identity(guid: &str) -> PlayerIdentity {
        PlayerIdentity::new(guid, "76561198000000001", "Survivor")
    }

    fn session(config: &SessionConfig) -> Loopback {
        let store = FilePlayerStore::open(config).unwrap();
        Loopback::new(config.clone(), Arc::new(ManualClock::new(0))).with_store(Arc::new(store))
    }

    fn record_name(config: &SessionConfig, identity: &PlayerIdentity, wanted: PermissionSource) -> String {
        permission_sources(identity, config)
            .into_iter()
            .find(|(source, _)| *source == wanted)
            .map(|(_, name)| name)
            .unwrap()
    }

    fn read_lines(config: &SessionConfig, name: &str) -> Vec<String> {
        fs::read_to_string(config.permissions_dir.join(name))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_connect_writes_both_records() {
        let dir = TempDir::new().unwrap();
        let config = SessionConfig::for_testing(dir.path());
        let mut lb = session(&config);

        lb.join(identity("a+b/c="), None);

        assert!(config.permissions_dir.join("abc.txt").exists());
        let record = fs::read_to_string(config.players_dir.join("abc.json")).unwrap();
        assert!(record.contains("\"a+b/c=\""));
        assert!(record.contains("everyone"));
    }

    #[test]
    fn test_legacy_steam_record_is_migrated() {
        let dir = TempDir::new().unwrap();
        let config = SessionConfig::for_testing(dir.path());
        let player = identity("guid-a");
        let legacy = record_name(&config, &player, PermissionSource::SteamLegacy);
        fs::create_dir_all(&config.permissions_dir).unwrap();
        fs::write(
            config.permissions_dir.join(&legacy),
            "Teleport\nSpawn.Vehicle DISALLOW\n\n",
        )
        .unwrap();

        let mut lb = session(&config);
        lb.join(player.clone(), None);

        assert!(lb.server().has_permission("guid-a", "Teleport"));
        assert!(!lb.server().has_permission("guid-a", "Spawn.Vehicle"));
        assert!(lb.client("guid-a").unwrap().has_permission("Teleport"));

        assert!(!config.permissions_dir.join(&legacy).exists());
        let primary = permission_record_name("guid-a", &config);
        assert_eq!(
            read_lines(&config, &primary),
            vec!["Spawn.Vehicle DISALLOW", "Teleport ALLOW"]
        );
    }

    #[test]
    fn test_primary_record_wins_over_legacy() {
        let dir = TempDir::new().unwrap();
        let config = SessionConfig::for_testing(dir.path());
        let player = identity("guid-a");
        let primary = record_name(&config, &player, PermissionSource::Guid);
        let steam = record_name(&config, &player, PermissionSource::Steam);
        fs::create_dir_all(&config.permissions_dir).unwrap();
        fs::write(config.permissions_dir.join(&primary), "Kick ALLOW\n").unwrap();
        fs::write(config.permissions_dir.join(&steam), "Ban ALLOW\n").unwrap();

        let mut lb = session(&config);
        lb.join(player, None);

        assert!(lb.server().has_permission("guid-a", "Kick"));
        assert!(!lb.server().has_permission("guid-a", "Ban"));
        // Only a record that was actually read gets migrated.
        assert!(config.permissions_dir.join(&steam).exists());
    }

    #[test]
    fn test_state_survives_restart() {
        let dir = TempDir::new().unwrap();
        let config = SessionConfig::for_testing(dir.path());

        {
            let mut lb = session(&config);
            lb.server().roles().load_role("mod", vec!["Teleport ALLOW".into()]);
            lb.join(identity("a"), None);
            lb.server_mut()
                .load_player_permissions("a", &["Spawn ALLOW".to_string()])
                .unwrap();
            lb.server_mut()
                .load_player_roles("a", &["mod".to_string()])
                .unwrap();
            lb.leave("a");
        }

        let mut lb = session(&config);
        lb.server().roles().load_role("mod", vec!["Teleport ALLOW".into()]);
        lb.join(identity("a"), None);

        let player = lb.server().player("a").unwrap();
        assert!(player.has_role("mod"));
        assert!(player.has_permission("Spawn"));
        assert!(player.has_permission("Teleport"));
    }

    #[test]
    fn test_roles_missing_after_restart_are_dropped() {
        let dir = TempDir::new().unwrap();
        let config = SessionConfig::for_testing(dir.path());

        {
            let mut lb = session(&config);
            lb.server().roles().load_role("mod", Vec::new());
            lb.join(identity("a"), None);
            lb.server_mut()
                .load_player_roles("a", &["mod".to_string()])
                .unwrap();
        }

        let mut lb = session(&config);
        lb.join(identity("a"), None);
        assert_eq!(lb.server().player("a").unwrap().roles(), &["everyone".to_string()]);
    }

    #[test]
    fn test_unreadable_player_record_is_replaced() {
        let dir = TempDir::new().unwrap();
        let config = SessionConfig::for_testing(dir.path());
        fs::create_dir_all(&config.players_dir).unwrap();
        let path = config.players_dir.join("a.json");
        fs::write(&path, "{ not json").unwrap();

        let mut lb = session(&config);
        lb.join(identity("a"), None);

        assert!(lb.server().player("a").is_some());
        let record = fs::read_to_string(&path).unwrap();
        assert!(record.contains("\"guid\": \"a\""));
    }
}
