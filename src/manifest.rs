//! The fixed provisioning manifest
//!
//! Five template artifacts are managed symmetrically by setup and remove. A
//! sixth artifact, the database client module, is special: it is created only
//! when absent at its canonical path and is never removed, since consumer
//! code outside this manifest may import it.

/// One managed artifact: a template body and its destination in the project
#[derive(Debug, Clone, Copy)]
pub struct ManifestEntry {
    /// Short human-readable name used in reports
    pub name: &'static str,
    /// What the artifact is for, shown in verbose output
    pub description: &'static str,
    /// Destination path relative to the project root
    pub dest: &'static str,
    /// File content written on provisioning
    pub template: &'static str,
}

/// npm package the provisioned files import
pub const CLIENT_LIBRARY: &str = "@supabase/supabase-js";

/// Canonical destination of the database client module
pub const CLIENT_MODULE_DEST: &str = "utils/db/client.ts";

/// Known non-canonical locations where projects keep a database client.
/// A hit here produces a warning during setup but does not suppress creation
/// of the canonical module.
pub const CLIENT_MODULE_ALT_PATHS: &[&str] = &[
    "utils/supabase.ts",
    "utils/supabase/client.ts",
    "lib/supabase.ts",
    "lib/supabase/client.ts",
    "lib/db/client.ts",
];

/// Directories the remover may prune, in pruning order. A directory is only
/// removed when it exists and is empty after the manifest files are gone.
pub const WATCHED_DIRS: &[&str] = &["app/api/keep-alive", "utils", "config"];

/// The five managed artifacts, in processing order
pub const MANIFEST: &[ManifestEntry] = &[
    ManifestEntry {
        name: "keep-alive route",
        description: "HTTP endpoint the scheduler pings to touch the database",
        dest: "app/api/keep-alive/route.ts",
        template: KEEP_ALIVE_ROUTE,
    },
    ManifestEntry {
        name: "keep-alive helper",
        description: "Inserts and prunes throwaway rows so the project stays active",
        dest: "utils/keep-alive.ts",
        template: KEEP_ALIVE_HELPER,
    },
    ManifestEntry {
        name: "keep-alive config",
        description: "Table name, column and behavior toggles for the helper",
        dest: "config/keep-alive.ts",
        template: KEEP_ALIVE_CONFIG,
    },
    ManifestEntry {
        name: "keep-alive schema",
        description: "SQL to create the table the helper writes to",
        dest: "keep-alive.sql",
        template: KEEP_ALIVE_SQL,
    },
    ManifestEntry {
        name: "cron schedule",
        description: "Deployment descriptor that pings the route periodically",
        dest: "vercel.json",
        template: CRON_SCHEDULE,
    },
];

const KEEP_ALIVE_ROUTE: &str = r#"import { NextResponse } from "next/server";

import { runKeepAlive } from "../../../../utils/keep-alive";

export const revalidate = 0;

export async function GET() {
  const report = await runKeepAlive();
  return NextResponse.json(report, { status: report.success ? 200 : 500 });
}
"#;

const KEEP_ALIVE_HELPER: &str = r#"import { dbClient } from "./db/client";
import { keepAliveConfig } from "../config/keep-alive";

type KeepAliveReport = {
  success: boolean;
  messages: string[];
};

const randomName = () =>
  Array.from({ length: keepAliveConfig.entryLength }, () =>
    keepAliveConfig.alphabet.charAt(
      Math.floor(Math.random() * keepAliveConfig.alphabet.length),
    ),
  ).join("");

export async function runKeepAlive(): Promise<KeepAliveReport> {
  const messages: string[] = [];
  const name = randomName();

  const { error: insertError } = await dbClient
    .from(keepAliveConfig.table)
    .insert({ [keepAliveConfig.column]: name });
  if (insertError) {
    return { success: false, messages: [insertError.message] };
  }
  messages.push(`inserted '${name}' into '${keepAliveConfig.table}'`);

  if (keepAliveConfig.pruneAfterInsert) {
    const { error: deleteError } = await dbClient
      .from(keepAliveConfig.table)
      .delete()
      .eq(keepAliveConfig.column, name);
    if (deleteError) {
      return { success: false, messages: [...messages, deleteError.message] };
    }
    messages.push(`deleted '${name}' from '${keepAliveConfig.table}'`);
  }

  return { success: true, messages };
}
"#;

const KEEP_ALIVE_CONFIG: &str = r#"export const keepAliveConfig = {
  // Table and column the helper writes throwaway rows into.
  table: "keep_alive",
  column: "name",

  // Generated entry shape.
  entryLength: 12,
  alphabet: "abcdefghijklmnopqrstuvwxyz",

  // Delete each inserted row right away so the table stays small.
  pruneAfterInsert: true,
};
"#;

const KEEP_ALIVE_SQL: &str = r#"-- Table touched by the keep-alive route. Rows are throwaway; the point is
-- that the project sees regular activity and is not paused for inactivity.
create table if not exists keep_alive (
  id bigint generated by default as identity primary key,
  name text not null,
  inserted_at timestamptz not null default now()
);
"#;

const CRON_SCHEDULE: &str = r#"{
  "crons": [
    {
      "path": "/api/keep-alive",
      "schedule": "0 */6 * * *"
    }
  ]
}
"#;

pub(crate) const DB_CLIENT_MODULE: &str = r#"import { createClient } from "@supabase/supabase-js";

const url = process.env.SUPABASE_URL;
const key = process.env.SUPABASE_SERVICE_ROLE_KEY;

if (!url || !key) {
  throw new Error(
    "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY must be set to use the database client",
  );
}

export const dbClient = createClient(url, key, {
  auth: { persistSession: false },
});
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn manifest_has_five_entries_with_unique_destinations() {
        assert_eq!(MANIFEST.len(), 5);
        let dests: HashSet<_> = MANIFEST.iter().map(|e| e.dest).collect();
        assert_eq!(dests.len(), MANIFEST.len());
    }

    #[test]
    fn client_module_is_not_part_of_the_manifest() {
        assert!(MANIFEST.iter().all(|e| e.dest != CLIENT_MODULE_DEST));
    }

    #[test]
    fn templates_are_non_empty_and_newline_terminated() {
        for entry in MANIFEST {
            assert!(!entry.template.trim().is_empty(), "{} is empty", entry.name);
            assert!(
                entry.template.ends_with('\n'),
                "{} should end with a newline",
                entry.name
            );
        }
        assert!(DB_CLIENT_MODULE.ends_with('\n'));
    }

    #[test]
    fn destinations_use_forward_slashes_and_stay_relative() {
        for entry in MANIFEST {
            assert!(!entry.dest.starts_with('/'), "{} is absolute", entry.dest);
            assert!(!entry.dest.contains('\\'), "{} uses backslashes", entry.dest);
            assert!(!entry.dest.contains(".."), "{} escapes the root", entry.dest);
        }
    }

    #[test]
    fn cron_schedule_is_valid_json_pointing_at_the_route() {
        let parsed: serde_json::Value =
            serde_json::from_str(CRON_SCHEDULE).expect("cron schedule should be JSON");
        assert_eq!(parsed["crons"][0]["path"], "/api/keep-alive");
    }

    #[test]
    fn watched_dirs_cover_the_directories_setup_creates() {
        assert!(WATCHED_DIRS.contains(&"app/api/keep-alive"));
        assert!(WATCHED_DIRS.contains(&"config"));
        // utils stays listed even though the client module usually keeps it
        // non-empty; pruning only ever removes empty directories.
        assert!(WATCHED_DIRS.contains(&"utils"));
    }
}
