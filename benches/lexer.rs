//! Lexer benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dialect_core::{Lexer, TokenKind};

const SAMPLE_SOURCE: &str = r#"
import { signal, computed, effect } from 'dialect-runtime';

component Counter({ start = 0 }) {
  const [count, setCount] = signal(start);
  const doubled = computed(() => count() * 2);

  effect(() => {
    console.log(`count is now ${count()}`);
  });

  return (
    <div className="counter" style={{ color: doubled() > 10 ? 'red' : 'black' }}>
      <button onClick={() => setCount(count() - 1)}>-</button>
      <span>{count()}</span>
      <button onClick={() => setCount(count() + 1)}>+</button>
      <Show when={doubled() > 10} fallback={<span>low</span>}>
        <span>doubled is {doubled()}</span>
      </Show>
    </div>
  );
}

export default Counter;
"#;

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");
    group.throughput(Throughput::Bytes(SAMPLE_SOURCE.len() as u64));

    group.bench_function("sample", |b| {
        b.iter(|| {
            let mut lex = Lexer::new(black_box(SAMPLE_SOURCE));
            let mut diags = Vec::new();
            loop {
                let token = lex.next_token(&mut diags);
                if matches!(token.kind, TokenKind::Eof) {
                    break;
                }
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
