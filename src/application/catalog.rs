// Static chart catalog for the PostgreSQL plugin
//
// Server-scoped charts are registered once at startup. Per-database charts
// are kept as templates with a ${database} placeholder in chart and
// dimension ids, filled in when a database is discovered.
use crate::domain::chart::{Chart, ChartType, Dimension};
use crate::domain::collection::Charts;

/// Placeholder substituted with the database name when a template is
/// instantiated.
pub const DATABASE_VAR: &str = "${database}";

const PRIO_BASE: i32 = 70_000;

pub const PRIO_CONNECTIONS_UTILIZATION: i32 = PRIO_BASE;
pub const PRIO_CONNECTIONS_USAGE: i32 = PRIO_BASE + 1;
pub const PRIO_CHECKPOINTS: i32 = PRIO_BASE + 2;
pub const PRIO_CHECKPOINT_TIME: i32 = PRIO_BASE + 3;
pub const PRIO_BGWRITER_BUFFERS_ALLOCATED: i32 = PRIO_BASE + 4;
pub const PRIO_BGWRITER_BUFFERS_WRITTEN: i32 = PRIO_BASE + 5;
pub const PRIO_BGWRITER_MAXWRITTEN_CLEAN: i32 = PRIO_BASE + 6;
pub const PRIO_BGWRITER_BACKEND_FSYNC: i32 = PRIO_BASE + 7;
pub const PRIO_WAL_WRITES: i32 = PRIO_BASE + 8;
pub const PRIO_WAL_FILES: i32 = PRIO_BASE + 9;
pub const PRIO_WAL_ARCHIVE: i32 = PRIO_BASE + 10;
pub const PRIO_AUTOVACUUM_WORKERS: i32 = PRIO_BASE + 11;
pub const PRIO_AUTOVACUUM_PERCENT_TOWARDS: i32 = PRIO_BASE + 12;
pub const PRIO_TXID_WRAPAROUND_PERCENT_TOWARDS: i32 = PRIO_BASE + 13;
pub const PRIO_TXID_WRAPAROUND_OLDEST_TXID: i32 = PRIO_BASE + 14;
pub const PRIO_CATALOG_RELATION_COUNT: i32 = PRIO_BASE + 15;
pub const PRIO_CATALOG_RELATION_SIZE: i32 = PRIO_BASE + 16;
pub const PRIO_UPTIME: i32 = PRIO_BASE + 17;
pub const PRIO_DB_TRANSACTIONS: i32 = PRIO_BASE + 18;
pub const PRIO_DB_CONNECTIONS_UTILIZATION: i32 = PRIO_BASE + 19;
pub const PRIO_DB_CONNECTIONS: i32 = PRIO_BASE + 20;
pub const PRIO_DB_BUFFER_CACHE: i32 = PRIO_BASE + 21;
pub const PRIO_DB_READ_OPERATIONS: i32 = PRIO_BASE + 22;
pub const PRIO_DB_WRITE_OPERATIONS: i32 = PRIO_BASE + 23;
pub const PRIO_DB_CONFLICTS: i32 = PRIO_BASE + 24;
pub const PRIO_DB_CONFLICTS_STAT: i32 = PRIO_BASE + 25;
pub const PRIO_DB_DEADLOCKS: i32 = PRIO_BASE + 26;
pub const PRIO_DB_LOCKS_HELD: i32 = PRIO_BASE + 27;
pub const PRIO_DB_LOCKS_AWAITED: i32 = PRIO_BASE + 28;
pub const PRIO_DB_TEMP_FILES: i32 = PRIO_BASE + 29;
pub const PRIO_DB_TEMP_FILES_DATA: i32 = PRIO_BASE + 30;
pub const PRIO_DB_SIZE: i32 = PRIO_BASE + 31;

/// Server-scoped charts, in display order.
pub fn base_charts() -> Charts {
    let mut charts = Charts::new();
    for chart in [
        connections_utilization_chart(),
        connections_usage_chart(),
        checkpoints_chart(),
        checkpoint_time_chart(),
        bgwriter_buffers_written_chart(),
        bgwriter_buffers_alloc_chart(),
        bgwriter_maxwritten_clean_chart(),
        bgwriter_buffers_backend_fsync_chart(),
        wal_writes_chart(),
        wal_files_chart(),
        wal_archive_files_chart(),
        autovacuum_workers_chart(),
        percent_towards_emergency_autovacuum_chart(),
        percent_towards_txid_wraparound_chart(),
        oldest_txid_chart(),
        catalog_relation_count_chart(),
        catalog_relation_size_chart(),
        server_uptime_chart(),
    ] {
        // The table above is static and id-unique, add cannot fail.
        charts.add(chart).expect("base chart table is valid");
    }
    charts
}

/// Per-database chart templates, in display order.
pub fn database_chart_templates() -> Vec<Chart> {
    vec![
        db_transactions_chart_tmpl(),
        db_connections_utilization_chart_tmpl(),
        db_connections_chart_tmpl(),
        db_buffer_cache_chart_tmpl(),
        db_read_ops_chart_tmpl(),
        db_write_ops_chart_tmpl(),
        db_conflicts_chart_tmpl(),
        db_conflicts_stat_chart_tmpl(),
        db_deadlocks_chart_tmpl(),
        db_locks_held_chart_tmpl(),
        db_locks_awaited_chart_tmpl(),
        db_temp_files_chart_tmpl(),
        db_temp_files_data_chart_tmpl(),
        db_size_chart_tmpl(),
    ]
}

fn connections_utilization_chart() -> Chart {
    Chart::new(
        "connections_utilization",
        "Connections utilization",
        "percentage",
        "connections",
        "postgres.connections_utilization",
        PRIO_CONNECTIONS_UTILIZATION,
    )
    .with_dims(vec![Dimension::new("server_connections_utilization", "used")])
}

fn connections_usage_chart() -> Chart {
    Chart::new(
        "connections_usage",
        "Connections usage",
        "connections",
        "connections",
        "postgres.connections_usage",
        PRIO_CONNECTIONS_USAGE,
    )
    .with_type(ChartType::Stacked)
    .with_dims(vec![
        Dimension::new("server_connections_available", "available"),
        Dimension::new("server_connections_used", "used"),
    ])
}

fn checkpoints_chart() -> Chart {
    Chart::new(
        "checkpoints",
        "Checkpoints",
        "checkpoints/s",
        "checkpointer",
        "postgres.checkpoints",
        PRIO_CHECKPOINTS,
    )
    .with_type(ChartType::Stacked)
    .with_dims(vec![
        Dimension::incremental("checkpoints_timed", "scheduled"),
        Dimension::incremental("checkpoints_req", "requested"),
    ])
}

fn checkpoint_time_chart() -> Chart {
    Chart::new(
        "checkpoint_time",
        "Checkpoint time",
        "milliseconds",
        "checkpointer",
        "postgres.checkpoint_time",
        PRIO_CHECKPOINT_TIME,
    )
    .with_dims(vec![
        Dimension::incremental("checkpoint_write_time", "write"),
        Dimension::incremental("checkpoint_sync_time", "sync"),
    ])
}

fn bgwriter_buffers_alloc_chart() -> Chart {
    Chart::new(
        "bgwriter_buffers_alloc",
        "Background writer buffers allocated",
        "B/s",
        "background writer",
        "postgres.bgwriter_buffers_alloc",
        PRIO_BGWRITER_BUFFERS_ALLOCATED,
    )
    .with_dims(vec![Dimension::incremental("buffers_alloc", "allocated")])
}

fn bgwriter_buffers_written_chart() -> Chart {
    Chart::new(
        "bgwriter_buffers_written",
        "Background writer buffers written",
        "B/s",
        "background writer",
        "postgres.bgwriter_buffers_written",
        PRIO_BGWRITER_BUFFERS_WRITTEN,
    )
    .with_type(ChartType::Area)
    .with_dims(vec![
        Dimension::incremental("buffers_checkpoint", "checkpoint"),
        Dimension::incremental("buffers_backend", "backend"),
        Dimension::incremental("buffers_clean", "clean"),
    ])
}

fn bgwriter_maxwritten_clean_chart() -> Chart {
    Chart::new(
        "bgwriter_maxwritten_clean",
        "Background writer cleaning scan stops",
        "events/s",
        "background writer",
        "postgres.bgwriter_maxwritten_clean",
        PRIO_BGWRITER_MAXWRITTEN_CLEAN,
    )
    .with_dims(vec![Dimension::incremental("maxwritten_clean", "maxwritten")])
}

fn bgwriter_buffers_backend_fsync_chart() -> Chart {
    Chart::new(
        "bgwriter_buffers_backend_fsync",
        "Backend fsync",
        "operations/s",
        "background writer",
        "postgres.bgwriter_buffers_backend_fsync",
        PRIO_BGWRITER_BACKEND_FSYNC,
    )
    .with_dims(vec![Dimension::incremental("buffers_backend_fsync", "fsync")])
}

fn wal_writes_chart() -> Chart {
    Chart::new(
        "wal_writes",
        "Write-Ahead Log",
        "B/s",
        "wal",
        "postgres.wal_writes",
        PRIO_WAL_WRITES,
    )
    .with_dims(vec![Dimension::incremental("wal_writes", "writes")])
}

fn wal_files_chart() -> Chart {
    Chart::new(
        "wal_files",
        "Write-Ahead Log files",
        "files",
        "wal",
        "postgres.wal_files",
        PRIO_WAL_FILES,
    )
    .with_type(ChartType::Stacked)
    .with_dims(vec![
        Dimension::new("wal_written_files", "written"),
        Dimension::new("wal_recycled_files", "recycled"),
    ])
}

fn wal_archive_files_chart() -> Chart {
    Chart::new(
        "wal_archive_files",
        "Write-Ahead Log archive files",
        "files/s",
        "wal archive",
        "postgres.wal_archive_files",
        PRIO_WAL_ARCHIVE,
    )
    .with_type(ChartType::Stacked)
    .with_dims(vec![
        Dimension::incremental("wal_archive_files_ready_count", "ready"),
        Dimension::incremental("wal_archive_files_done_count", "done"),
    ])
}

fn autovacuum_workers_chart() -> Chart {
    Chart::new(
        "autovacuum_workers",
        "Autovacuum workers",
        "workers",
        "autovacuum",
        "postgres.autovacuum_workers",
        PRIO_AUTOVACUUM_WORKERS,
    )
    .with_dims(vec![
        Dimension::new("autovacuum_analyze", "analyze"),
        Dimension::new("autovacuum_vacuum_analyze", "vacuum_analyze"),
        Dimension::new("autovacuum_vacuum", "vacuum"),
        Dimension::new("autovacuum_vacuum_freeze", "vacuum_freeze"),
        Dimension::new("autovacuum_brin_summarize", "brin_summarize"),
    ])
}

fn percent_towards_emergency_autovacuum_chart() -> Chart {
    Chart::new(
        "percent_towards_emergency_autovacuum",
        "Percent towards emergency autovacuum",
        "percentage",
        "autovacuum",
        "postgres.percent_towards_emergency_autovacuum",
        PRIO_AUTOVACUUM_PERCENT_TOWARDS,
    )
    .with_dims(vec![Dimension::new(
        "percent_towards_emergency_autovacuum",
        "emergency_autovacuum",
    )])
}

fn percent_towards_txid_wraparound_chart() -> Chart {
    Chart::new(
        "percent_towards_txid_wraparound",
        "Percent towards transaction ID wraparound",
        "percentage",
        "txid wraparound",
        "postgres.percent_towards_txid_wraparound",
        PRIO_TXID_WRAPAROUND_PERCENT_TOWARDS,
    )
    .with_dims(vec![Dimension::new("percent_towards_wraparound", "txid_wraparound")])
}

fn oldest_txid_chart() -> Chart {
    Chart::new(
        "oldest_transaction_xid",
        "Oldest transaction XID",
        "xid",
        "txid wraparound",
        "postgres.oldest_transaction_xid",
        PRIO_TXID_WRAPAROUND_OLDEST_TXID,
    )
    .with_dims(vec![Dimension::new("oldest_current_xid", "xid")])
}

fn catalog_relation_count_chart() -> Chart {
    Chart::new(
        "catalog_relation_count",
        "Relation count",
        "relations",
        "catalog",
        "postgres.catalog_relation_count",
        PRIO_CATALOG_RELATION_COUNT,
    )
    .with_type(ChartType::Stacked)
    .with_dims(relkind_dims("count"))
}

fn catalog_relation_size_chart() -> Chart {
    Chart::new(
        "catalog_relation_size",
        "Relation size",
        "B",
        "catalog",
        "postgres.catalog_relation_size",
        PRIO_CATALOG_RELATION_SIZE,
    )
    .with_type(ChartType::Stacked)
    .with_dims(relkind_dims("size"))
}

// Dimension ids carry the single-letter relkind codes from pg_class.
fn relkind_dims(suffix: &str) -> Vec<Dimension> {
    [
        ("r", "ordinary_table"),
        ("i", "index"),
        ("S", "sequence"),
        ("t", "toast_table"),
        ("v", "view"),
        ("m", "materialized_view"),
        ("c", "composite_type"),
        ("f", "foreign_table"),
        ("p", "partitioned_table"),
        ("I", "partitioned_index"),
    ]
    .iter()
    .map(|(kind, name)| Dimension::new(&format!("catalog_relkind_{kind}_{suffix}"), name))
    .collect()
}

fn server_uptime_chart() -> Chart {
    Chart::new(
        "server_uptime",
        "Uptime",
        "seconds",
        "uptime",
        "postgres.uptime",
        PRIO_UPTIME,
    )
    .with_dims(vec![Dimension::new("server_uptime", "uptime")])
}

fn db_transactions_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_transactions",
        "Database transactions",
        "transactions/s",
        "db transactions",
        "postgres.db_transactions",
        PRIO_DB_TRANSACTIONS,
    )
    .with_dims(vec![
        Dimension::incremental("db_${database}_xact_commit", "committed"),
        Dimension::incremental("db_${database}_xact_rollback", "rollback"),
    ])
}

fn db_connections_utilization_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_connections_utilization",
        "Database connections utilization withing limits",
        "percentage",
        "db connections",
        "postgres.db_connections_utilization",
        PRIO_DB_CONNECTIONS_UTILIZATION,
    )
    .with_dims(vec![Dimension::new("db_${database}_numbackends_utilization", "used")])
}

fn db_connections_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_connections",
        "Database connections",
        "connections",
        "db connections",
        "postgres.db_connections",
        PRIO_DB_CONNECTIONS,
    )
    .with_dims(vec![Dimension::new("db_${database}_numbackends", "connections")])
}

fn db_buffer_cache_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_buffer_cache",
        "Database buffer cache",
        "blocks/s",
        "db buffer cache",
        "postgres.db_buffer_cache",
        PRIO_DB_BUFFER_CACHE,
    )
    .with_type(ChartType::Area)
    .with_dims(vec![
        Dimension::incremental("db_${database}_blks_hit", "hit"),
        Dimension::incremental("db_${database}_blks_read", "miss"),
    ])
}

fn db_read_ops_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_read_operations",
        "Database read operations",
        "rows/s",
        "db operations",
        "postgres.db_read_operations",
        PRIO_DB_READ_OPERATIONS,
    )
    .with_dims(vec![
        Dimension::incremental("db_${database}_tup_returned", "returned"),
        Dimension::incremental("db_${database}_tup_fetched", "fetched"),
    ])
}

fn db_write_ops_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_write_operations",
        "Database write operations",
        "rows/s",
        "db operations",
        "postgres.db_write_operations",
        PRIO_DB_WRITE_OPERATIONS,
    )
    .with_dims(vec![
        Dimension::incremental("db_${database}_tup_inserted", "inserted"),
        Dimension::incremental("db_${database}_tup_deleted", "deleted"),
        Dimension::incremental("db_${database}_tup_updated", "updated"),
    ])
}

fn db_conflicts_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_conflicts",
        "Database canceled queries",
        "queries/s",
        "db operations",
        "postgres.db_conflicts",
        PRIO_DB_CONFLICTS,
    )
    .with_dims(vec![Dimension::incremental("db_${database}_conflicts", "conflicts")])
}

fn db_conflicts_stat_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_conflicts_stat",
        "Database canceled queries by reason",
        "queries/s",
        "db operations",
        "postgres.db_conflicts_stat",
        PRIO_DB_CONFLICTS_STAT,
    )
    .with_dims(vec![
        Dimension::incremental("db_${database}_confl_tablespace", "tablespace"),
        Dimension::incremental("db_${database}_confl_lock", "lock"),
        Dimension::incremental("db_${database}_confl_snapshot", "snapshot"),
        Dimension::incremental("db_${database}_confl_bufferpin", "bufferpin"),
        Dimension::incremental("db_${database}_confl_deadlock", "deadlock"),
    ])
}

fn db_deadlocks_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_deadlocks",
        "Database deadlocks",
        "deadlocks/s",
        "db deadlocks",
        "postgres.db_deadlocks",
        PRIO_DB_DEADLOCKS,
    )
    .with_dims(vec![Dimension::incremental("db_${database}_deadlocks", "deadlocks")])
}

fn db_locks_held_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_locks_held",
        "Database locks held",
        "locks",
        "db locks",
        "postgres.db_locks_held",
        PRIO_DB_LOCKS_HELD,
    )
    .with_type(ChartType::Stacked)
    .with_dims(lock_mode_dims("held"))
}

fn db_locks_awaited_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_locks_awaited",
        "Database locks awaited",
        "locks",
        "db locks",
        "postgres.db_locks_awaited",
        PRIO_DB_LOCKS_AWAITED,
    )
    .with_type(ChartType::Stacked)
    .with_dims(lock_mode_dims("awaited"))
}

// Lock mode spellings match pg_locks.mode.
fn lock_mode_dims(suffix: &str) -> Vec<Dimension> {
    [
        ("AccessShareLock", "access_share"),
        ("RowShareLock", "row_share"),
        ("RowExclusiveLock", "row_exclusive"),
        ("ShareUpdateExclusiveLock", "share_update"),
        ("ShareLock", "share"),
        ("ShareRowExclusiveLock", "share_row_exclusive"),
        ("ExclusiveLock", "exclusive"),
        ("AccessExclusiveLock", "access_exclusive"),
    ]
    .iter()
    .map(|(mode, name)| {
        Dimension::new(&format!("db_${{database}}_lock_mode_{mode}_{suffix}"), name)
    })
    .collect()
}

fn db_temp_files_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_temp_files",
        "Database temporary files written to disk",
        "files/s",
        "db temp files",
        "postgres.db_temp_files",
        PRIO_DB_TEMP_FILES,
    )
    .with_dims(vec![Dimension::incremental("db_${database}_temp_files", "written")])
}

fn db_temp_files_data_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_temp_files_data",
        "Database temporary files data written to disk",
        "B/s",
        "db temp files",
        "postgres.db_temp_files_data",
        PRIO_DB_TEMP_FILES_DATA,
    )
    .with_dims(vec![Dimension::incremental("db_${database}_temp_bytes", "written")])
}

fn db_size_chart_tmpl() -> Chart {
    Chart::new(
        "db_${database}_size",
        "Database size",
        "B",
        "db size",
        "postgres.db_size",
        PRIO_DB_SIZE,
    )
    .with_dims(vec![Dimension::new("db_${database}_size", "size")])
}
