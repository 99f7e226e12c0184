use act_core::{Intentions, OwnerMut, OwnerView, TickContext, Vec2};
use act_tree::{
    ActionNode, Aim, MoveBy, Parallel, Repeat, ScriptDriver, Sequence, ShootPattern, Wait,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

struct Entity {
    intentions: Intentions,
}

impl OwnerView for Entity {
    fn position(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn intentions(&self) -> &Intentions {
        &self.intentions
    }
}

impl OwnerMut for Entity {
    fn intentions_mut(&mut self) -> &mut Intentions {
        &mut self.intentions
    }
}

fn branch(i: usize) -> ActionNode {
    let angle = i as f32 * 11.25;
    Repeat::new(Sequence::new(vec![
        Wait::new(0.05).into(),
        MoveBy::new(Vec2::from_angle_deg(angle), 4.0).into(),
        ShootPattern::new(angle - 20.0, angle + 20.0, 5, 0.1)
            .with_aim(Aim::Forward)
            .into(),
    ]))
    .into()
}

fn bench_tree_tick(c: &mut Criterion) {
    let root = Parallel::new((0..32).map(branch).collect());
    let mut driver = ScriptDriver::with_tree(root);
    let mut entity = Entity {
        intentions: Intentions::all(),
    };

    let mut ctx = TickContext::new(0, 1.0 / 60.0);
    let _ = driver.activate(&ctx, &mut entity, None);

    c.bench_function("act-tree/tick(branches=32)", |b| {
        b.iter(|| {
            ctx = ctx.next();
            driver.tick(&ctx, &mut entity);
            if let Some(fire) = entity.intentions.fire.as_mut() {
                black_box(fire.drain_directions());
            }
        })
    });
}

criterion_group!(benches, bench_tree_tick);
criterion_main!(benches);
