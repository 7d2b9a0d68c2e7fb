use std::env;
use std::fs::File;
use std::process;
use std::time::Instant;

use ordersight_pipeline::dataset::Dataset;
use ordersight_pipeline::report::{run_all, DashboardReport, SectionOutcome, DEFAULT_TOP_N};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: ordersight-report <extract.csv> [--top N] [--json]");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --top      Number of top clients per ranking (default: {DEFAULT_TOP_N})");
        eprintln!("  --json     Output as JSON instead of formatted text");
        eprintln!();
        eprintln!("Example:");
        eprintln!("  ordersight-report fixtures/deliveries.csv");
        eprintln!("  ordersight-report fixtures/deliveries.csv --top 5 --json");
        process::exit(1);
    }

    let csv_path = &args[1];

    let mut top_n = DEFAULT_TOP_N;
    let mut json_output = false;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--top" => {
                if i + 1 < args.len() {
                    top_n = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: --top requires a positive integer");
                        process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --top requires a number");
                    process::exit(1);
                }
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    let load_start = Instant::now();
    let file = match File::open(csv_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening {}: {}", csv_path, e);
            process::exit(1);
        }
    };
    let dataset = match Dataset::from_csv(file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error loading CSV: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();
    log::info!("loaded {} rows from {}", dataset.len(), csv_path);

    let report_start = Instant::now();
    let report = run_all(&dataset, top_n);
    let report_ms = report_start.elapsed().as_millis();

    if json_output {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(&report, load_ms, report_ms);
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_human(report: &DashboardReport, load_ms: u128, report_ms: u128) {
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(62));
    println!("  \u{2551}            ORDERSIGHT \u{2014} Order Delivery Dashboard            \u{2551}");
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(62));
    println!();

    let kpi = &report.kpi;
    println!(
        "  {} rows analyzed  \u{00b7}  {} orders  \u{00b7}  {} delivered  \u{00b7}  {} not delivered",
        report.rows_analyzed, kpi.total_orders, kpi.delivered, kpi.not_delivered
    );
    println!(
        "  Delivery rate {:.1}% (target {:.0}%)  \u{00b7}  Score {:.1}/10 \u{00b7} {}  \u{00b7}  {}",
        kpi.delivery_rate_pct, kpi.gauge.target, kpi.score_out_of_ten, kpi.band, kpi.trend
    );
    println!();

    print_segmentation(&report.client_segmentation);
    print_tiers(&report.client_tiers);
    print_temporal(&report.temporal);
    print_employees(&report.employees);

    println!(
        "  \u{23f1}  CSV loaded in {}ms \u{00b7} Report built in {}ms \u{00b7} Total {}ms",
        load_ms,
        report_ms,
        load_ms + report_ms
    );
    println!();
}

fn section_header(title: &str) {
    println!("  {:\u{2500}<64}", "");
    println!("  {}", title);
    println!();
}

fn print_skip<T>(title: &str, outcome: &SectionOutcome<T>) -> bool {
    match outcome {
        SectionOutcome::Completed { .. } => false,
        SectionOutcome::Skipped { reason } => {
            section_header(title);
            println!("  skipped: {}", reason);
            println!();
            true
        }
        SectionOutcome::Failed { reason } => {
            section_header(title);
            println!("  FAILED: {}", reason);
            println!();
            true
        }
    }
}

fn print_segmentation(
    outcome: &SectionOutcome<ordersight_pipeline::sections::client_segmentation::ClientSegmentation>,
) {
    let title = "Client Segmentation (adaptive)";
    if print_skip(title, outcome) {
        return;
    }
    let Some(section) = outcome.data() else { return };

    section_header(title);
    if let Some(t) = &section.thresholds {
        println!(
            "  thresholds: rate p50 {:.1}% / p75 {:.1}%  \u{00b7}  volume p50 {:.1} / p75 {:.1}",
            t.rate_p50, t.rate_p75, t.volume_p50, t.volume_p75
        );
        println!();
    }
    for (i, c) in section.clients.iter().enumerate() {
        let category = c
            .category
            .map(|cat| cat.to_string())
            .unwrap_or_else(|| "-".into());
        let rate = c
            .delivery_rate_pct
            .map(|r| format!("{:.1}%", r))
            .unwrap_or_else(|| "n/a".into());
        println!(
            "  {:>2}. C{:<8} {:>6} orders  rate {:>6}  {}",
            i + 1,
            c.entity_key,
            c.total,
            rate,
            category
        );
    }
    if !section.category_counts.is_empty() {
        let mix: Vec<String> = section
            .category_counts
            .iter()
            .map(|s| format!("{} {}", s.count, s.label))
            .collect();
        println!();
        println!("  mix: {}", mix.join(" \u{00b7} "));
    }
    println!();
}

fn print_tiers(outcome: &SectionOutcome<ordersight_pipeline::sections::client_tiers::ClientTiers>) {
    let title = "Client Tiers (fixed thresholds)";
    if print_skip(title, outcome) {
        return;
    }
    let Some(section) = outcome.data() else { return };

    section_header(title);
    for (i, c) in section.clients.iter().enumerate() {
        let tier = c
            .category
            .map(|cat| cat.to_string())
            .unwrap_or_else(|| "-".into());
        let rate = c
            .delivery_rate_pct
            .map(|r| format!("{:.1}%", r))
            .unwrap_or_else(|| "n/a".into());
        println!(
            "  {:>2}. C{:<8} {:>6} orders  rate {:>6}  {}",
            i + 1,
            c.entity_key,
            c.total,
            rate,
            tier
        );
    }
    let mean_rate = section
        .mean_rate_pct
        .map(|r| format!("{:.1}%", r))
        .unwrap_or_else(|| "n/a".into());
    println!();
    println!(
        "  mean rate {}  \u{00b7}  mean volume {:.1}",
        mean_rate, section.mean_volume
    );
    println!();
}

fn print_temporal(
    outcome: &SectionOutcome<ordersight_pipeline::sections::temporal::TemporalAnalysis>,
) {
    let title = "Delivery Performance Over Time";
    if print_skip(title, outcome) {
        return;
    }
    let Some(section) = outcome.data() else { return };

    section_header(title);
    for p in &section.periods {
        let rate = p
            .rate_pct
            .map(|r| format!("{:.1}%", r))
            .unwrap_or_else(|| "n/a".into());
        println!(
            "  T{:<6} {:>6} delivered  {:>6} not delivered  rate {:>6}",
            p.period, p.delivered, p.not_delivered, rate
        );
    }
    if let Some(top) = &section.top_clients_by_delivered {
        println!();
        println!("  top clients by deliveries:");
        for (i, c) in top.iter().enumerate() {
            println!(
                "  {:>2}. C{:<8} {:>6} delivered of {} orders",
                i + 1,
                c.entity_key,
                c.delivered,
                c.total
            );
        }
    }
    println!();
}

fn print_employees(
    outcome: &SectionOutcome<ordersight_pipeline::sections::employees::EmployeePerformance>,
) {
    let title = "Employee Performance";
    if print_skip(title, outcome) {
        return;
    }
    let Some(section) = outcome.data() else { return };

    section_header(title);
    for e in &section.employees {
        let rate = e
            .delivery_rate_pct
            .map(|r| format!("{:.1}%", r))
            .unwrap_or_else(|| "n/a".into());
        println!(
            "  Emp{:<6} {:>6} delivered  {:>6} not delivered  rate {:>6}",
            e.entity_key, e.delivered, e.not_delivered, rate
        );
    }
    println!();
}
