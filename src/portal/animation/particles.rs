//! 粒子背景：每帧移动粒子并计算所有粒子两两之间的距离，近的连线

use crate::portal::animation::AnimationHandle;
use rand::Rng;
use std::time::Duration;

pub const DEFAULT_PARTICLE_COUNT: usize = 35;
pub const DEFAULT_LINK_DISTANCE: f32 = 120.0;
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

/// 两个粒子之间的连线，距离越近越不透明
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    width: f32,
    height: f32,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// 在画布内随机生成粒子
    pub fn random<R: Rng>(count: usize, width: f32, height: f32, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                x: rng.gen_range(0.0..=width.max(0.0)),
                y: rng.gen_range(0.0..=height.max(0.0)),
                vx: rng.gen_range(-0.5..0.5),
                vy: rng.gen_range(-0.5..0.5),
                radius: rng.gen_range(1.0..3.0),
            })
            .collect();
        Self::with_particles(width, height, particles)
    }

    pub fn with_particles(width: f32, height: f32, particles: Vec<Particle>) -> Self {
        Self {
            width,
            height,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// 画布尺寸变化时把粒子夹回范围内
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        for p in &mut self.particles {
            p.x = p.x.clamp(0.0, width.max(0.0));
            p.y = p.y.clamp(0.0, height.max(0.0));
        }
    }

    /// 前进一帧，碰到边界反弹
    pub fn step(&mut self) {
        let (w, h) = (self.width.max(0.0), self.height.max(0.0));
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            if p.x < 0.0 || p.x > w {
                p.vx = -p.vx;
                p.x = p.x.clamp(0.0, w);
            }
            if p.y < 0.0 || p.y > h {
                p.vy = -p.vy;
                p.y = p.y.clamp(0.0, h);
            }
        }
    }

    pub fn links(&self, max_distance: f32) -> Vec<Link> {
        let mut links = Vec::new();
        if max_distance <= 0.0 {
            return links;
        }
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                if distance < max_distance {
                    links.push(Link {
                        a: i,
                        b: j,
                        opacity: 1.0 - distance / max_distance,
                    });
                }
            }
        }
        links
    }
}

/// 按帧间隔运行粒子动画，每帧回调一次
pub fn spawn_particle_loop<F>(
    mut field: ParticleField,
    frame_interval: Duration,
    max_distance: f32,
    mut on_frame: F,
) -> AnimationHandle
where
    F: FnMut(&ParticleField, &[Link]) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(frame_interval);
        loop {
            interval.tick().await;
            field.step();
            let links = field.links(max_distance);
            on_frame(&field, &links);
        }
    });
    AnimationHandle::new(task)
}
