//! Benchmarks for the mapping and serialization paths.

use std::path::Path;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use kg2aas::graph::rdf;
use kg2aas::model::{
    DataTypeDefXsd, ElementHeader, Environment, ModellingKind, Property, Submodel,
    SubmodelElement, SubmodelElementCollection,
};
use kg2aas::pipeline::{Pipeline, PipelineConfig};
use kg2aas::query::{OxigraphExecutor, QueryTemplate};
use kg2aas::serializer::Serializer;

fn property(i: usize) -> SubmodelElement {
    SubmodelElement::Property(Property {
        header: ElementHeader::with_id_short(format!("p{i}")),
        value_type: DataTypeDefXsd::Double,
        value: Some(format!("{}.5", i)),
        value_id: None,
    })
}

/// `submodels` submodels, each with `width` collections of `width` properties.
fn environment(submodels: usize, width: usize) -> Environment {
    let mut env = Environment::default();
    for s in 0..submodels {
        let elements = (0..width)
            .map(|c| {
                SubmodelElement::SubmodelElementCollection(SubmodelElementCollection {
                    header: ElementHeader::with_id_short(format!("c{c}")),
                    value: (0..width).map(property).collect(),
                })
            })
            .collect();
        env.submodels.push(Submodel {
            header: ElementHeader::with_id_short(format!("sm{s}")),
            id: format!("https://bench.example.net/sm/{s}"),
            administration: None,
            kind: Some(ModellingKind::Instance),
            submodel_elements: elements,
        });
    }
    env
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    for submodels in [1, 16] {
        let env = environment(submodels, 16);
        group.bench_with_input(BenchmarkId::from_parameter(submodels), &env, |b, env| {
            b.iter(|| black_box(Serializer::new().environment_to_graph(env).unwrap()))
        });
    }
    group.finish();
}

fn bench_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_graph");
    let graph = Serializer::new()
        .environment_to_graph(&environment(16, 16))
        .unwrap();
    for parallel in [false, true] {
        let pipeline = Pipeline::new(PipelineConfig {
            parallel,
            ..Default::default()
        });
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| {
            b.iter(|| black_box(pipeline.map_graph(&graph).unwrap()))
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let source = rdf::read_file(&fixtures.join("tensile_test.ttl")).unwrap();
    let template = QueryTemplate::load(&fixtures.join("tensile_mapping.sparql")).unwrap();
    let pipeline = Pipeline::new(PipelineConfig::with_namespace("https://bench.example.net"));

    c.bench_function("pipeline_tensile", |b| {
        b.iter(|| {
            black_box(
                pipeline
                    .run(&source, &template, &OxigraphExecutor::new(), None)
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_serialize, bench_map, bench_pipeline);
criterion_main!(benches);
