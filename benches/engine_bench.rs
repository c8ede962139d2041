//! Benchmarks for rule application and tree building.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use plantilla::core::builder;
use plantilla::core::engine;
use plantilla::core::params::{Backend, BootstrapParams};
use plantilla::core::rules::Rule;

fn sample_params(backend: Backend) -> BootstrapParams {
    BootstrapParams {
        app_name: "bench-app".to_string(),
        target_dir: std::path::PathBuf::from("/tmp/bench-app"),
        hostname: Some("http://bench.example.com".to_string()),
        backend,
        verbose: false,
        install: false,
    }
}

fn bench_literal_rule(c: &mut Criterion) {
    let rule = Rule::literal_all("classic", "nova");
    let mut group = c.benchmark_group("literal_rule");
    for size in [64, 256, 1024, 4096] {
        let input: String = "the classic backend ".repeat(size / 20);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let out = rule.apply(black_box(input)).unwrap();
                black_box(out);
            });
        });
    }
    group.finish();
}

fn bench_regex_rule(c: &mut Criterion) {
    // Includes the per-apply pattern compilation the engine pays.
    let rule = Rule::regex(r#"appName: "(.*?)""#, r#"appName: "bench""#);
    let input = format!(
        "{}appName: \"Dashboards App\",\n{}",
        "// filler line\n".repeat(50),
        "// filler line\n".repeat(50)
    );
    c.bench_function("regex_rule_apply", |b| {
        b.iter(|| {
            let out = rule.apply(black_box(&input)).unwrap();
            black_box(out);
        });
    });
}

fn bench_build_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tree");
    for backend in [Backend::Classic, Backend::Nova] {
        let params = sample_params(backend);
        group.bench_with_input(
            BenchmarkId::from_parameter(backend),
            &params,
            |b, params| {
                b.iter(|| {
                    let tree = builder::build(black_box(params));
                    black_box(tree);
                });
            },
        );
    }
    group.finish();
}

fn bench_engine_apply(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("src/components/Header")).unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        concat!(
            "{\n",
            "    \"name\": \"@dashboards/app-name-placeholder\",\n",
            "    \"scripts\": {\n",
            "        \"start\": \"cross-env HTTPS=true react-scripts start\",\n",
            "        \"refresh-catalog\": \"node ./scripts/refresh-catalog.js\"\n",
            "    },\n",
            "    \"dependencies\": {\n",
            "        \"@dashboards/sdk-backend-classic\": \"^9.1.0\"\n",
            "    }\n",
            "}\n"
        ),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("src/constants.js"),
        concat!(
            "module.exports = {\n",
            "    appName: \"Dashboards App\",\n",
            "    backend: \"https://public.dashboards.example.com\",\n",
            "    workspace: \"\",\n",
            "};\n"
        ),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("src/setupProxy.js"),
        "module.exports = (app) => app.use(proxy(\"/data\", options));\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("src/components/Header/Header.js"),
        "import Aside from \"./Aside\";\nexport default () => <header><Aside /></header>;\n",
    )
    .unwrap();

    let params = sample_params(Backend::Nova);
    let tree = builder::build(&params);

    // First iteration rewrites; the rest measure the steady-state fold.
    c.bench_function("engine_apply_tree", |b| {
        b.iter(|| {
            engine::apply(black_box(&tree), black_box(dir.path())).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_literal_rule,
    bench_regex_rule,
    bench_build_tree,
    bench_engine_apply
);
criterion_main!(benches);
