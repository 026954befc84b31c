use serde_json::Value;
use serde_json::json;

/// Single tenant → app → epg chain.
pub fn single_epg_tree() -> Value {
	json!({
		"tenant": [{
			"Name": "t1",
			"app": [{
				"Name": "a1",
				"epg": [{ "Name": "e1", "bd": "bd1" }]
			}]
		}]
	})
}

/// Two tenants with several applications and endpoint groups. `t2` has an
/// application without endpoint groups and one endpoint group without a name.
pub fn tenant_tree() -> Value {
	json!({
		"fabric": "lab",
		"tenant": [
			{
				"Name": "t1",
				"description": "first tenant",
				"app": [
					{
						"Name": "web",
						"epg": [
							{ "Name": "frontend", "bd": "bd-web", "vlans": [101, 102] },
							{ "Name": "backend", "bd": "bd-app" }
						]
					},
					{
						"Name": "db",
						"epg": [{ "Name": "sql", "bd": "bd-db" }]
					}
				]
			},
			{
				"Name": "t2",
				"app": [
					{ "Name": "empty" },
					{
						"Name": "legacy",
						"epg": [{ "bd": "bd-legacy" }, { "Name": "mainframe", "bd": "bd-mf" }]
					}
				]
			}
		]
	})
}

/// Same content as [`tenant_tree`] with the tenant and application collections
/// stored as mappings keyed by name.
pub fn tenant_tree_as_mappings() -> Value {
	json!({
		"fabric": "lab",
		"tenant": {
			"t1": {
				"Name": "t1",
				"description": "first tenant",
				"app": {
					"web": {
						"Name": "web",
						"epg": [
							{ "Name": "frontend", "bd": "bd-web", "vlans": [101, 102] },
							{ "Name": "backend", "bd": "bd-app" }
						]
					},
					"db": {
						"Name": "db",
						"epg": [{ "Name": "sql", "bd": "bd-db" }]
					}
				}
			},
			"t2": {
				"Name": "t2",
				"app": {
					"empty": { "Name": "empty" },
					"legacy": {
						"Name": "legacy",
						"epg": [{ "bd": "bd-legacy" }, { "Name": "mainframe", "bd": "bd-mf" }]
					}
				}
			}
		}
	})
}

/// Leaf switches with numeric names, ports and port types.
pub fn leaf_tree() -> Value {
	json!({
		"leafid": [
			{
				"Name": 101,
				"port": [
					{ "Name": 1, "type": [{ "Name": "switch_port" }] },
					{ "Name": 2, "type": [{ "Name": "port_channel" }] }
				]
			},
			{
				"Name": 203,
				"port": [
					{ "Name": 42, "type": [{ "Name": "switch_port" }] }
				]
			}
		]
	})
}

/// Access policies where the profile records are nested one sequence deeper
/// than usual.
pub fn access_policy_tree() -> Value {
	json!({
		"access_policy": [{
			"Name": "default",
			"interface_policy_profile": [
				[
					{
						"Name": "leaf101_998",
						"interface_selector": [
							{ "Name": "eth1_1", "from": 1, "to": 1 },
							{ "Name": "eth1_2", "from": 2, "to": 2 }
						]
					},
					{
						"Name": "leaf102_100",
						"interface_selector": [{ "Name": "eth1_9", "from": 9, "to": 9 }]
					}
				],
				{
					"Name": "leaf103_998",
					"interface_selector": [{ "Name": "eth1_3", "from": 3, "to": 3 }]
				}
			]
		}]
	})
}
