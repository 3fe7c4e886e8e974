//! dash-runner: headless runner for the investment dashboard core.
//!
//! Usage:
//!   dash-runner --data-dir ./data --user superadmin@investdash.io
//!   dash-runner --verify
//!   dash-runner --ipc-mode

use anyhow::Result;
use investdash_core::{
    analytics::DistributionSlice,
    api::DemoApi,
    config::DashboardConfig,
    demo_data::{demo_dataset, DemoDataset},
    model::UserStatus,
    performance::PerformanceGenerator,
    state::{auth::AuthState, data::DataStore},
    validation::{validate_company_form, CompanyFormData},
    views::{view_for, RoleView},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetMetrics,
    GetPortfolio { user_id: String },
    GetPerformance { investment_id: String },
    GetView { email: String },
    ValidateCompany { form: CompanyFormData },
    SetUserStatus { user_id: String, status: UserStatus },
    Refresh,
    Quit,
}

struct Runner {
    config:    DashboardConfig,
    store:     DataStore,
    generator: PerformanceGenerator,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let verify = args.iter().any(|a| a == "--verify");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let email = string_arg(&args, "--user").unwrap_or("superadmin@investdash.io");

    let mut config = match DashboardConfig::load(data_dir) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{e}; using built-in defaults");
            DashboardConfig::default()
        }
    };
    config.master_seed = parse_arg(&args, "--seed", config.master_seed);

    let dataset = load_dataset(&config, data_dir)?;

    if verify {
        return run_verify(&dataset);
    }

    if !ipc_mode {
        println!("InvestDash - dash-runner");
        println!("  data_dir:  {data_dir}");
        println!("  seed:      {}", config.master_seed);
        println!("  user:      {email}");
        println!();
    }

    let api = Rc::new(DemoApi::new(dataset));
    let mut store = DataStore::new(api.clone());
    store.fetch_all();
    if let Some(err) = store.last_error() {
        anyhow::bail!("Initial fetch failed: {err}");
    }

    let mut runner = Runner {
        generator: PerformanceGenerator::from_config(&config),
        config,
        store,
    };

    if ipc_mode {
        run_ipc_loop(&mut runner, &api)
    } else {
        let mut auth = AuthState::new();
        let user = auth.login(&*api, email)?.clone();
        let view = view_for(
            &user,
            runner.store.view_data(),
            &runner.generator,
            chrono::Utc::now().date_naive(),
            &runner.config.palette,
        );
        print_summary(&runner.config, &view);
        Ok(())
    }
}

fn load_dataset(config: &DashboardConfig, data_dir: &str) -> Result<DemoDataset> {
    match &config.dataset_dir {
        Some(dir) => DemoDataset::load(&format!("{data_dir}/{dir}")),
        None => Ok(demo_dataset()),
    }
}

/// Dataset health check: exits non-zero when any issue is found.
fn run_verify(dataset: &DemoDataset) -> Result<()> {
    let issues = dataset.verify();
    println!(
        "checked {} users, {} companies, {} investments, {} subscriptions",
        dataset.users.len(),
        dataset.companies.len(),
        dataset.investments.len(),
        dataset.subscriptions.len()
    );
    if issues.is_empty() {
        println!("OK: dataset is consistent");
        return Ok(());
    }
    for issue in &issues {
        println!("  FAIL: {issue}");
    }
    anyhow::bail!("{} dataset issue(s) found", issues.len())
}

fn run_ipc_loop(runner: &mut Runner, api: &DemoApi) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        if matches!(cmd, IpcCommand::Quit) {
            break;
        }
        let reply = match handle_command(runner, api, cmd) {
            Ok(v) => v,
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };
        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn handle_command(
    runner: &mut Runner,
    api: &DemoApi,
    cmd: IpcCommand,
) -> Result<serde_json::Value> {
    let today = chrono::Utc::now().date_naive();
    let value = match cmd {
        IpcCommand::GetMetrics => serde_json::to_value(runner.store.metrics())?,
        IpcCommand::GetPortfolio { user_id } => {
            let data = runner.store.view_data();
            serde_json::to_value(investdash_core::analytics::investor_portfolio(
                &user_id,
                data.subscriptions,
                data.investments,
            ))?
        }
        IpcCommand::GetPerformance { investment_id } => {
            let inv = runner
                .store
                .get_investment(&investment_id)
                .ok_or_else(|| anyhow::anyhow!("Investment {investment_id} not found"))?;
            serde_json::to_value(runner.generator.generate(
                &inv.id,
                inv.initial_amount,
                inv.current_value,
                today,
            ))?
        }
        IpcCommand::GetView { email } => {
            let mut auth = AuthState::new();
            let user = auth.login(api, &email)?.clone();
            serde_json::to_value(view_for(
                &user,
                runner.store.view_data(),
                &runner.generator,
                today,
                &runner.config.palette,
            ))?
        }
        IpcCommand::ValidateCompany { form } => {
            serde_json::to_value(validate_company_form(&form))?
        }
        IpcCommand::SetUserStatus { user_id, status } => {
            serde_json::to_value(runner.store.set_user_status(&user_id, status)?)?
        }
        IpcCommand::Refresh => {
            runner.store.fetch_all();
            serde_json::json!({ "state": runner.store.state() })
        }
        IpcCommand::Quit => serde_json::Value::Null,
    };
    Ok(value)
}

fn print_summary(config: &DashboardConfig, view: &RoleView) {
    let cur = config.currency_symbol.as_str();
    match view {
        RoleView::Superadmin(v) => {
            let m = &v.metrics;
            println!("=== PLATFORM OVERVIEW ===");
            println!("  users:          {}", m.total_users);
            println!("  investors:      {}", m.total_investors);
            println!("  companies:      {}", m.total_companies);
            println!("  investments:    {} ({} active)", m.total_investments, m.active_investments);
            println!("  total value:    {cur}{:.2}", m.total_value);
            println!("  profit/loss:    {cur}{:.2}", m.total_profit_loss);
            println!("  ROI:            {:.2}%", m.total_roi);
            println!("  pending users:  {}", v.pending_investors.len());
            print_distribution("BY COMPANY", cur, &v.company_distribution);
            print_distribution("BY ASSET TYPE", cur, &v.asset_distribution);
        }
        RoleView::Admin(v) => {
            println!("=== COMPANY OVERVIEW ===");
            match &v.company {
                Some(c) => println!("  company:        {} ({})", c.name, c.industry),
                None => println!("  (No company assigned)"),
            }
            println!("  investments:    {}", v.metrics.total_investments);
            println!("  investors:      {}", v.metrics.total_investors);
            println!("  total value:    {cur}{:.2}", v.metrics.total_value);
            println!("  profit:         {cur}{:.2}", v.performance.profit);
            println!("  loss:           {cur}{:.2}", v.performance.loss);
            println!("  ROI:            {:.2}%", v.performance.roi);
            print_distribution("BY ASSET TYPE", cur, &v.asset_distribution);
        }
        RoleView::Investor(v) => {
            let p = &v.portfolio;
            println!("=== MY PORTFOLIO ===");
            println!("  holdings:       {}", p.investment_count);
            println!("  invested:       {cur}{:.2}", p.total_invested);
            println!("  current value:  {cur}{:.2}", p.total_current_value);
            println!("  profit/loss:    {cur}{:.2}", p.total_profit_loss);
            println!("  ROI:            {:.2}%", p.total_roi);
            if !v.can_invest {
                println!("  (Account pending approval, investing disabled)");
            }
            for e in &p.investments {
                println!(
                    "  {:<28} {cur}{:>12.2} -> {cur}{:>12.2}",
                    e.investment_name(),
                    e.subscription.amount,
                    e.subscription.current_value
                );
            }
            print_distribution("BY ASSET TYPE", cur, &v.distribution);
        }
        RoleView::Salesman(v) => {
            println!("=== INVESTOR BOOK ===");
            println!("  under mgmt:     {cur}{:.2}", v.total_under_management);
            println!("  pending:        {}", v.pending_approvals);
            for s in &v.investors {
                println!(
                    "  {:<20} {cur}{:>12.2}  {:>6.2}%  ({} holdings)",
                    s.user.name, s.total_invested, s.total_roi, s.investment_count
                );
            }
        }
    }
}

fn print_distribution(title: &str, cur: &str, slices: &[DistributionSlice]) {
    println!();
    println!("=== {title} ===");
    if slices.is_empty() {
        println!("  (No data)");
    }
    for s in slices {
        println!("  {:<28} {cur}{:>12.2}  {}", s.name, s.value, s.color);
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
