//! # Fuzzy Decision — Demonstração: Seleção de Arma
//!
//! Monta o exemplo clássico de **desejabilidade de uma arma** (lança-foguetes)
//! a partir da distância ao alvo e da munição restante, para um esquadrão de
//! agentes avaliados em paralelo.
//!
//! ## Fluxo
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging (RUST_LOG)
//!   ├── Para cada agente (rayon, um FuzzyModule por agente):
//!   │     ├── fuzzify(distance), fuzzify(ammo)
//!   │     └── defuzzify(desirability) — MaxAv e Centroid
//!   ├── Imprime a tabela de decisões
//!   └── Opcional: salva o snapshot do módulo no caminho passado como argumento
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! cargo run
//! RUST_LOG=debug cargo run -- data/rocket_launcher.json
//! ```

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use fuzzy_decision::persistence;
use fuzzy_decision::{DefuzzifyMethod, FuzzyModule, FuzzyResult, FuzzyRule, FuzzyVariable, Term};

/// Leitura sensorial de um agente no tick corrente.
struct Agent {
    name: &'static str,
    distance: f64,
    ammo: f64,
}

/// Decisão calculada para um agente.
struct Decision {
    name: &'static str,
    max_av: f64,
    centroid: f64,
}

const SQUAD: [Agent; 5] = [
    Agent { name: "alpha", distance: 20.0, ammo: 8.0 },
    Agent { name: "bravo", distance: 120.0, ammo: 25.0 },
    Agent { name: "charlie", distance: 200.0, ammo: 3.0 },
    Agent { name: "delta", distance: 400.0, ammo: 60.0 },
    Agent { name: "echo", distance: 700.0, ammo: 12.0 },
];

/// Base de regras do lança-foguetes: 3 × 3 combinações distância/munição.
fn rocket_launcher_module() -> FuzzyResult<FuzzyModule> {
    let mut distance = FuzzyVariable::new("distance");
    let close = distance.add_left_shoulder("close", 0.0, 25.0, 150.0)?;
    let medium = distance.add_triangle("medium", 25.0, 150.0, 300.0)?;
    let far = distance.add_right_shoulder("far", 150.0, 300.0, 1000.0)?;

    let mut ammo = FuzzyVariable::new("ammo");
    let low = ammo.add_triangle("low", 0.0, 0.0, 10.0)?;
    let okay = ammo.add_triangle("okay", 0.0, 10.0, 30.0)?;
    let loads = ammo.add_right_shoulder("loads", 10.0, 30.0, 100.0)?;

    let mut desirability = FuzzyVariable::new("desirability");
    let undesirable = desirability.add_left_shoulder("undesirable", 0.0, 25.0, 50.0)?;
    let desirable = desirability.add_triangle("desirable", 25.0, 50.0, 75.0)?;
    let very_desirable = desirability.add_right_shoulder("very_desirable", 50.0, 75.0, 100.0)?;

    let mut module = FuzzyModule::new();
    module.add_flv("distance", distance);
    module.add_flv("ammo", ammo);
    module.add_flv("desirability", desirability);

    let table = [
        (&close, &loads, &undesirable),
        (&close, &okay, &undesirable),
        (&close, &low, &undesirable),
        (&medium, &loads, &very_desirable),
        (&medium, &okay, &very_desirable),
        (&medium, &low, &desirable),
        (&far, &loads, &desirable),
        (&far, &okay, &undesirable),
        (&far, &low, &undesirable),
    ];
    for (range, stock, outcome) in table {
        let antecedent = Term::and(vec![range.into(), stock.into()])?;
        module.add_rule(FuzzyRule::new(antecedent, outcome))?;
    }
    Ok(module)
}

fn decide(agent: &Agent) -> FuzzyResult<Decision> {
    let module = rocket_launcher_module()?;
    module.fuzzify("distance", agent.distance)?;
    module.fuzzify("ammo", agent.ammo)?;
    Ok(Decision {
        name: agent.name,
        max_av: module.defuzzify("desirability", DefuzzifyMethod::MaxAv)?,
        centroid: module.defuzzify("desirability", DefuzzifyMethod::Centroid)?,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(agents = SQUAD.len(), "Avaliando desejabilidade do lança-foguetes");

    // Um módulo independente por agente: ciclos paralelos nunca compartilham conjuntos.
    let decisions = SQUAD
        .par_iter()
        .map(decide)
        .collect::<FuzzyResult<Vec<_>>>()
        .context("Falha ao avaliar o esquadrão")?;

    println!("{:<10} {:>8} {:>9}", "agent", "max_av", "centroid");
    for decision in &decisions {
        println!(
            "{:<10} {:>8.2} {:>9.2}",
            decision.name, decision.max_av, decision.centroid
        );
    }

    if let Some(path) = std::env::args().nth(1) {
        let module = rocket_launcher_module().context("Falha ao montar o módulo")?;
        persistence::save_module(&module, &path)?;
        tracing::info!(path = %path, "Snapshot do módulo salvo");
    }

    Ok(())
}
